//! Tree-walking renderer
//!
//! Text is written to the sink as nodes are visited. Sections render their
//! own children under an adjusted scope and tell the outer walk to skip
//! them.

use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::error::RenderError;
use crate::parser::ast::{Document, Node, NodeKind, Tag, TagKind};
use crate::parser::walk::{walk, WalkControl};
use crate::template::PartialLoader;
use crate::value::Value;

use super::config::{RenderConfig, MAX_RENDER_DEPTH};
use super::context::Context;
use super::escape::escape_html;

/// Renders parsed nodes into a byte sink
pub struct Renderer<'r, W> {
    out: W,
    config: &'r RenderConfig,
    loader: Option<&'r dyn PartialLoader>,
    partial_depth: usize,
    /// Sections and partials currently being rendered
    depth: usize,
    /// Partials parsed so far, by name
    partials: HashMap<String, Rc<Document>>,
}

impl<'r, W: Write> Renderer<'r, W> {
    pub fn new(out: W, config: &'r RenderConfig, loader: Option<&'r dyn PartialLoader>) -> Self {
        Self {
            out,
            config,
            loader,
            partial_depth: 0,
            depth: 0,
            partials: HashMap::new(),
        }
    }

    /// Render `nodes` in document order, resolving names through `ctx`
    ///
    /// On return, `ctx` holds exactly the frames it held on entry.
    pub fn render<'a>(&mut self, ctx: &mut Context<'a>, nodes: &[Node]) -> Result<(), RenderError> {
        let mut failure = None;
        walk(nodes, |node, _| match self.visit(ctx, node) {
            Ok(control) => control,
            Err(err) => {
                failure = Some(err);
                WalkControl::Stop
            }
        });
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Give back the sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn visit<'a>(&mut self, ctx: &mut Context<'a>, node: &Node) -> Result<WalkControl, RenderError> {
        let tag = match &node.kind {
            NodeKind::Text(text) => {
                self.out.write_all(text.as_bytes())?;
                return Ok(WalkControl::Continue);
            }
            NodeKind::Tag(tag) => tag,
        };

        match tag.kind {
            TagKind::Variable => {
                if let Some(value) = ctx.resolve(&tag.name) {
                    self.write_value(value, self.config.escape_html)?;
                }
            }
            TagKind::UnescapedVariable => {
                if let Some(value) = ctx.resolve(&tag.name) {
                    self.write_value(value, false)?;
                }
            }
            TagKind::SectionBegin => {
                if let Some(value) = ctx.resolve(&tag.name).filter(|v| v.is_truthy()) {
                    self.nested(&tag.name, |this| this.render_section(ctx, node, value))?;
                }
                return Ok(WalkControl::Skip);
            }
            TagKind::SectionBeginInverted => {
                if !ctx.resolve(&tag.name).is_some_and(Value::is_truthy) {
                    self.nested(&tag.name, |this| this.render(ctx, &node.children))?;
                }
                return Ok(WalkControl::Skip);
            }
            TagKind::Partial => self.render_partial(ctx, tag)?,
            TagKind::SectionEnd | TagKind::Comment | TagKind::SetDelimiter => {}
        }

        Ok(WalkControl::Continue)
    }

    /// Run `f` one level deeper, failing once [`MAX_RENDER_DEPTH`] is reached
    fn nested(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Self) -> Result<(), RenderError>,
    ) -> Result<(), RenderError> {
        if self.depth >= MAX_RENDER_DEPTH {
            return Err(RenderError::NestingTooDeep {
                name: name.to_string(),
                limit: MAX_RENDER_DEPTH,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn render_section<'a>(
        &mut self,
        ctx: &mut Context<'a>,
        node: &Node,
        value: &'a Value,
    ) -> Result<(), RenderError> {
        match value {
            Value::List(items) => {
                for item in items {
                    let mut scope = ctx.scope(item);
                    self.render(&mut scope, &node.children)?;
                }
                Ok(())
            }
            Value::Object(_) | Value::Bool(_) => {
                let mut scope = ctx.scope(value);
                self.render(&mut scope, &node.children)
            }
            Value::String(_) => self.render(ctx, &node.children),
        }
    }

    fn render_partial<'a>(&mut self, ctx: &mut Context<'a>, tag: &Tag) -> Result<(), RenderError> {
        let Some(loader) = self.loader else {
            tracing::debug!(partial = %tag.name, "no partial loader configured, skipping");
            return Ok(());
        };

        if self.partial_depth >= self.config.max_partial_depth {
            return Err(RenderError::PartialRecursionLimit {
                name: tag.name.clone(),
                limit: self.config.max_partial_depth,
            });
        }

        let document = self.load_partial(loader, &tag.name)?;
        tracing::debug!(partial = %tag.name, depth = self.partial_depth + 1, "rendering partial");

        self.partial_depth += 1;
        let result = self.nested(&tag.name, |this| this.render(ctx, &document.nodes));
        self.partial_depth -= 1;
        result
    }

    /// Parsed partial `name`, asking the loader only the first time
    fn load_partial(&mut self, loader: &dyn PartialLoader, name: &str) -> Result<Rc<Document>, RenderError> {
        if let Some(document) = self.partials.get(name) {
            return Ok(Rc::clone(document));
        }

        let source = loader.load(name).ok_or_else(|| RenderError::PartialNotFound {
            name: name.to_string(),
        })?;
        let document = crate::parser::parse(&source).map_err(|source| RenderError::PartialParse {
            name: name.to_string(),
            source,
        })?;
        tracing::debug!(partial = %name, nodes = document.nodes.len(), "partial parsed");

        let document = Rc::new(document);
        self.partials.insert(name.to_string(), Rc::clone(&document));
        Ok(document)
    }

    fn write_value(&mut self, value: &Value, escape: bool) -> std::io::Result<()> {
        match value {
            Value::String(s) if escape => self.out.write_all(escape_html(s).as_bytes()),
            Value::String(s) => self.out.write_all(s.as_bytes()),
            Value::Bool(true) => self.out.write_all(b"true"),
            Value::Bool(false) => self.out.write_all(b"false"),
            Value::Object(_) | Value::List(_) => Ok(()),
        }
    }
}
