//! Compiled templates and partial loading
//!
//! A [`Template`] is parsed once and can then be rendered any number of
//! times, from any number of threads, against different data.
//!
//! # Example
//!
//! ```rust
//! use mustache_lite::{Template, Value};
//!
//! let template = Template::parse("Hello {{name}}!").unwrap();
//! let data = Value::object().with("name", "World");
//! assert_eq!(template.render(&data).unwrap(), "Hello World!");
//! ```

mod registry;

pub use registry::{PartialDir, PartialLoader, PartialRegistry, RegistryError, DEFAULT_EXTENSION};

use std::fmt::Write as _;
use std::io::Write;
use std::str::FromStr;

use crate::error::{ParseError, RenderError};
use crate::parser::{self, walk, Document, Node, NodeKind, WalkControl};
use crate::renderer::{Context, RenderConfig, Renderer};
use crate::value::Value;

/// A parsed template
///
/// Construction never fails outright: an unparsable source yields a template
/// whose [`is_valid`](Template::is_valid) is false and whose
/// [`error`](Template::error) explains why. Use [`Template::parse`] to get a
/// `Result` instead.
#[derive(Debug, Clone)]
pub struct Template {
    document: Document,
    error: Option<ParseError>,
}

impl Template {
    /// Compile `source`, recording any parse error on the template
    pub fn new(source: &str) -> Self {
        match parser::parse(source) {
            Ok(document) => {
                tracing::debug!(nodes = document.nodes.len(), "template parsed");
                Self {
                    document,
                    error: None,
                }
            }
            Err(error) => {
                tracing::debug!(%error, "template failed to parse");
                Self {
                    document: Document::default(),
                    error: Some(error),
                }
            }
        }
    }

    /// Compile `source`, failing on the first parse error
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let template = Self::new(source);
        match template.error {
            Some(error) => Err(error),
            None => Ok(template),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// One-line description of the parse error, including its byte offset
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Top-level nodes of the parsed tree
    pub fn nodes(&self) -> &[Node] {
        &self.document.nodes
    }

    /// Render to a string without partial support
    pub fn render(&self, data: &Value) -> Result<String, RenderError> {
        let mut out = Vec::new();
        self.render_to(&mut out, data)?;
        // Templates and values are both UTF-8, so the output is too
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Stream output into `writer` without partial support
    pub fn render_to<W: Write>(&self, writer: W, data: &Value) -> Result<(), RenderError> {
        self.render_with(writer, data, &RenderConfig::default(), None)
    }

    /// Stream output into `writer`, resolving `{{>name}}` through `loader`
    ///
    /// With no loader, partial tags produce no output.
    pub fn render_with<W: Write>(
        &self,
        writer: W,
        data: &Value,
        config: &RenderConfig,
        loader: Option<&dyn PartialLoader>,
    ) -> Result<(), RenderError> {
        if let Some(error) = &self.error {
            return Err(RenderError::InvalidTemplate(error.clone()));
        }

        let mut ctx = Context::new(data);
        let mut renderer = Renderer::new(writer, config, loader);
        renderer.render(&mut ctx, &self.document.nodes)?;
        renderer.into_inner().flush()?;
        Ok(())
    }

    /// Indented listing of the tree, one node per line, for debugging
    pub fn dump(&self) -> String {
        let mut out = String::new();
        walk(&self.document.nodes, |node, depth| {
            let indent = "  ".repeat(depth);
            let _ = match &node.kind {
                NodeKind::Text(text) => writeln!(out, "{}TXT {:?}", indent, text),
                NodeKind::Tag(tag) if tag.name.is_empty() => writeln!(out, "{}TAG {}", indent, tag.kind),
                NodeKind::Tag(tag) => writeln!(out, "{}TAG {} {}", indent, tag.kind, tag.name),
            };
            WalkControl::Continue
        });
        out
    }
}

impl FromStr for Template {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_invalid_template_keeps_message() {
        let template = Template::new("{{/x}}");
        assert!(!template.is_valid());
        assert_eq!(
            template.error_message().as_deref(),
            Some("section end tag \"x\" found without start tag at 0")
        );
        assert!(template.nodes().is_empty());
    }

    #[test]
    fn test_rendering_invalid_template_fails() {
        let template = Template::new("{{name");
        let err = template.render(&Value::object()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidTemplate(ParseError::UnterminatedTag { .. })
        ));
    }

    #[test]
    fn test_from_str() {
        let template: Template = "{{a}}".parse().unwrap();
        assert!(template.is_valid());
        assert!("{{#a}}".parse::<Template>().is_err());
    }

    #[test]
    fn test_render_with_loader() {
        let partials = PartialRegistry::new().with("name", "<{{n}}>").unwrap();
        let template = Template::parse("[{{>name}}]").unwrap();
        let data = Value::object().with("n", "x");
        let mut out = Vec::new();
        template
            .render_with(&mut out, &data, &RenderConfig::default(), Some(&partials))
            .unwrap();
        assert_eq!(out, b"[<x>]".to_vec());
    }

    #[test]
    fn test_dump() {
        let template =
            Template::parse("Hi {{name}}\n{{#items}}- {{&label}}{{^done}}!{{/done}}{{/items}}{{! note }}{{}}")
                .unwrap();
        assert_snapshot!(template.dump(), @r###"
        TXT "Hi "
        TAG Variable name
        TXT "\n"
        TAG SectionBegin items
          TXT "- "
          TAG UnescapedVariable label
          TAG SectionBeginInverted done
            TXT "!"
        TAG Comment note
        TAG Variable
        "###);
    }
}
