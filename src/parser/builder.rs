//! Tree builder: one left-to-right scan from template text to a node tree

use crate::error::ParseError;

use super::ast::{Document, Node, Span, Tag, TagKind};
use super::grammar::parse_delimiter_change;
use super::lexer::{classify, trim_ascii};
use super::walk::{walk_mut, WalkControl};

const BRACE_BEGIN: &str = "{{";
const BRACE_END: &str = "}}";
/// Closes the `{{{name}}}` short form
const BRACE_END_UNESCAPED: &str = "}}}";

/// Sections nested deeper than this are rejected
pub const MAX_SECTION_DEPTH: usize = 128;

/// Active tag delimiters; owned by one parse, never shared
#[derive(Debug, Clone)]
struct Delimiters {
    begin: String,
    end: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            begin: BRACE_BEGIN.to_string(),
            end: BRACE_END.to_string(),
        }
    }
}

impl Delimiters {
    /// The `{{{name}}}` short form is only recognised with brace delimiters
    fn is_brace(&self) -> bool {
        self.begin == BRACE_BEGIN && self.end == BRACE_END
    }
}

/// Location of one tag found by the scanner
struct RawTag<'s> {
    span: Span,
    content: &'s str,
    triple: bool,
}

/// Parse template text into a node tree
pub fn parse(input: &str) -> Result<Document, ParseError> {
    TreeBuilder::new(input).build()
}

struct TreeBuilder<'s> {
    input: &'s str,
    delimiters: Delimiters,
    root: Vec<Node>,
    /// Sections still waiting for their end tag, outermost first
    open: Vec<Node>,
}

impl<'s> TreeBuilder<'s> {
    fn new(input: &'s str) -> Self {
        Self {
            input,
            delimiters: Delimiters::default(),
            root: Vec::new(),
            open: Vec::new(),
        }
    }

    fn build(mut self) -> Result<Document, ParseError> {
        let mut position = 0;
        while position < self.input.len() {
            let Some(found) = self.input[position..].find(self.delimiters.begin.as_str()) else {
                self.push_text(position, self.input.len());
                break;
            };
            let tag_start = position + found;
            if tag_start > position {
                self.push_text(position, tag_start);
            }

            let raw = self.scan_tag(tag_start)?;
            position = raw.span.end;

            if raw.content.starts_with('=') {
                let change = parse_delimiter_change(raw.content)
                    .ok_or(ParseError::InvalidDelimiterTag { span: raw.span.clone() })?;
                tracing::trace!(begin = %change.begin, end = %change.end, offset = tag_start, "delimiters changed");
                self.delimiters = Delimiters {
                    begin: change.begin,
                    end: change.end,
                };
                continue;
            }

            let tag = if raw.triple {
                Tag::new(TagKind::UnescapedVariable, raw.content)
            } else {
                let (kind, name) = classify(raw.content);
                Tag::new(kind, name)
            };
            self.push_tag(tag, raw.span)?;
        }

        // Unclosed sections fold into their parents so the check below can
        // report the outermost one
        while let Some(section) = self.open.pop() {
            self.append(section);
        }

        let mut nodes = self.root;
        fold_section_ends(&mut nodes)?;
        Ok(Document { nodes })
    }

    /// Find the end of the tag starting at `tag_start`
    fn scan_tag(&self, tag_start: usize) -> Result<RawTag<'s>, ParseError> {
        let input = self.input;
        let mut content_start = tag_start + self.delimiters.begin.len();
        let triple = self.delimiters.is_brace() && input[content_start..].starts_with('{');
        let end = if triple {
            content_start += 1;
            BRACE_END_UNESCAPED
        } else {
            self.delimiters.end.as_str()
        };

        let content_end = input[content_start..]
            .find(end)
            .map(|offset| content_start + offset)
            .ok_or(ParseError::UnterminatedTag {
                span: tag_start..input.len(),
            })?;

        Ok(RawTag {
            span: tag_start..content_end + end.len(),
            content: trim_ascii(&input[content_start..content_end]),
            triple,
        })
    }

    fn push_text(&mut self, start: usize, end: usize) {
        let text = &self.input[start..end];
        self.append(Node::text(text, start..end));
    }

    fn push_tag(&mut self, tag: Tag, span: Span) -> Result<(), ParseError> {
        if tag.is_section_begin() {
            if self.open.len() >= MAX_SECTION_DEPTH {
                return Err(ParseError::NestingTooDeep {
                    limit: MAX_SECTION_DEPTH,
                    span,
                });
            }
            self.open.push(Node::tag(tag, span));
            return Ok(());
        }

        if tag.is_section_end() {
            let Some(mut section) = self.open.pop() else {
                return Err(ParseError::UnmatchedSectionEnd {
                    name: tag.name,
                    span,
                });
            };
            section.children.push(Node::tag(tag, span));
            self.append(section);
            return Ok(());
        }

        self.append(Node::tag(tag, span));
        Ok(())
    }

    /// Add a finished node to the innermost open section
    fn append(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(section) => section.children.push(node),
            None => self.root.push(node),
        }
    }
}

/// Check every section ends with its own end tag, then drop that tag
fn fold_section_ends(nodes: &mut [Node]) -> Result<(), ParseError> {
    let mut failure = None;
    walk_mut(nodes, |node, _| {
        let Some(tag) = node.as_tag().filter(|t| t.is_section_begin()) else {
            return WalkControl::Continue;
        };
        let closed = node
            .children
            .last()
            .and_then(Node::as_tag)
            .is_some_and(|end| end.is_section_end() && end.name == tag.name);
        if !closed {
            failure = Some(ParseError::UnterminatedSection {
                name: tag.name.clone(),
                span: node.span.clone(),
            });
            return WalkControl::Stop;
        }
        node.children.pop();
        WalkControl::Continue
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
