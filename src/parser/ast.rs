//! Tree types produced by the template parser

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// What a tag does, decided by its leading sigil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `{{name}}` - HTML-escaped substitution
    Variable,
    /// `{{{name}}}` or `{{&name}}` - raw substitution
    UnescapedVariable,
    /// `{{#name}}`
    SectionBegin,
    /// `{{^name}}`
    SectionBeginInverted,
    /// `{{/name}}`
    SectionEnd,
    /// `{{!text}}`
    Comment,
    /// `{{>name}}`
    Partial,
    /// `{{=<% %>=}}` - consumed while scanning, never stored in a tree.
    /// Only [`classify`](super::lexer::classify) reports it.
    SetDelimiter,
}

impl TagKind {
    /// Short name used by the tree dump
    pub fn label(self) -> &'static str {
        match self {
            TagKind::Variable => "Variable",
            TagKind::UnescapedVariable => "UnescapedVariable",
            TagKind::SectionBegin => "SectionBegin",
            TagKind::SectionBeginInverted => "SectionBeginInverted",
            TagKind::SectionEnd => "SectionEnd",
            TagKind::Comment => "Comment",
            TagKind::Partial => "Partial",
            TagKind::SetDelimiter => "SetDelimiter",
        }
    }
}

impl std::fmt::Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub kind: TagKind,
    /// Trimmed name with the sigil removed; empty only for a bare `{{}}`
    pub name: String,
}

impl Tag {
    pub fn new(kind: TagKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Normal or inverted section opener
    pub fn is_section_begin(&self) -> bool {
        matches!(
            self.kind,
            TagKind::SectionBegin | TagKind::SectionBeginInverted
        )
    }

    pub fn is_section_end(&self) -> bool {
        self.kind == TagKind::SectionEnd
    }
}

/// Payload of a tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Literal text, never empty
    Text(String),
    Tag(Tag),
}

/// One element of the template tree
///
/// Only section openers have children. Each node owns its subtree outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Where the node starts in the source, kept for diagnostics
    pub span: Span,
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(text: impl Into<String>, span: Span) -> Self {
        Self {
            kind: NodeKind::Text(text.into()),
            span,
            children: Vec::new(),
        }
    }

    pub fn tag(tag: Tag, span: Span) -> Self {
        Self {
            kind: NodeKind::Tag(tag),
            span,
            children: Vec::new(),
        }
    }

    /// The tag of a tag node, `None` for text
    pub fn as_tag(&self) -> Option<&Tag> {
        match &self.kind {
            NodeKind::Tag(tag) => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    pub fn is_section_begin(&self) -> bool {
        self.as_tag().is_some_and(Tag::is_section_begin)
    }

    pub fn is_section_end(&self) -> bool {
        self.as_tag().is_some_and(Tag::is_section_end)
    }

    /// Byte offset where the node starts
    pub fn position(&self) -> usize {
        self.span.start
    }
}

/// Root of a parsed template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub nodes: Vec<Node>,
}
