//! Error types for parsing and rendering

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

pub use crate::parser::ast::Span;

/// A template could not be compiled
///
/// Parsing stops at the first problem. Every variant carries the span of the
/// offending tag; the message names the tag's starting byte offset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no tag end delimiter found for start delimiter at {}", span.start)]
    UnterminatedTag { span: Span },

    #[error("invalid set delimiter tag found at {}", span.start)]
    InvalidDelimiterTag { span: Span },

    #[error("section end tag \"{name}\" found without start tag at {}", span.start)]
    UnmatchedSectionEnd { name: String, span: Span },

    #[error("no section end tag found for section \"{name}\" at {}", span.start)]
    UnterminatedSection { name: String, span: Span },

    #[error("sections nested deeper than {limit} levels at {}", span.start)]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParseError {
    /// Source range of the tag that caused the error
    pub fn span(&self) -> &Span {
        match self {
            ParseError::UnterminatedTag { span }
            | ParseError::InvalidDelimiterTag { span }
            | ParseError::UnmatchedSectionEnd { span, .. }
            | ParseError::UnterminatedSection { span, .. }
            | ParseError::NestingTooDeep { span, .. } => span,
        }
    }

    /// Byte offset of the first error
    pub fn offset(&self) -> usize {
        self.span().start
    }

    fn label(&self) -> &'static str {
        match self {
            ParseError::UnterminatedTag { .. } => "this tag is never closed",
            ParseError::InvalidDelimiterTag { .. } => "expected `=BEGIN END=`",
            ParseError::UnmatchedSectionEnd { .. } => "no open section to close",
            ParseError::UnterminatedSection { .. } => "section opened here",
            ParseError::NestingTooDeep { .. } => "section nesting limit reached here",
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let span = self.span().clone();

        // Writing into a Vec cannot fail
        let _ = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.label())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Errors that can occur while rendering a compiled template
#[derive(Error, Debug)]
pub enum RenderError {
    /// The template failed to parse and has no usable tree
    #[error("cannot render an invalid template: {0}")]
    InvalidTemplate(ParseError),

    /// The output sink rejected a write
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// The partial loader has no template under this name
    #[error("partial not found: {name}")]
    PartialNotFound { name: String },

    /// Partials included each other too deeply
    #[error("partial \"{name}\" exceeds the nesting limit of {limit}")]
    PartialRecursionLimit { name: String, limit: usize },

    /// Sections and partials stacked past [`MAX_RENDER_DEPTH`](crate::renderer::MAX_RENDER_DEPTH)
    #[error("sections and partials nested deeper than {limit} levels while rendering \"{name}\"")]
    NestingTooDeep { name: String, limit: usize },

    /// A loaded partial is not a valid template
    #[error("partial \"{name}\" failed to parse: {source}")]
    PartialParse {
        name: String,
        #[source]
        source: ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offset() {
        let err = ParseError::UnterminatedTag { span: 7..9 };
        assert_eq!(
            err.to_string(),
            "no tag end delimiter found for start delimiter at 7"
        );

        let err = ParseError::UnmatchedSectionEnd {
            name: "x".to_string(),
            span: 3..9,
        };
        assert_eq!(
            err.to_string(),
            "section end tag \"x\" found without start tag at 3"
        );
        assert_eq!(err.offset(), 3);
    }

    #[test]
    fn test_format_includes_source_context() {
        let source = "hello {{#a}} world";
        let err = ParseError::UnterminatedSection {
            name: "a".to_string(),
            span: 6..12,
        };
        let report = err.format(source, "greeting.mustache");
        assert!(report.contains("greeting.mustache"));
        assert!(report.contains("section opened here"));
        assert!(report.contains("no section end tag found for section \"a\" at 6"));
    }

    #[test]
    fn test_render_error_display() {
        let err = RenderError::PartialRecursionLimit {
            name: "loop".to_string(),
            limit: 4,
        };
        assert_eq!(
            err.to_string(),
            "partial \"loop\" exceeds the nesting limit of 4"
        );
    }
}
