//! Tag content lexing using logos
//!
//! The outer scan over the template is delimiter-driven and lives in the
//! tree builder. Once a tag's inner content is isolated, this module splits
//! off its leading sigil.

use logos::Logos;

use super::ast::TagKind;

/// Leading character of a tag's content
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sigil {
    #[token("#")]
    Section,
    #[token("^")]
    InvertedSection,
    #[token("/")]
    SectionEnd,
    #[token(">")]
    Partial,
    #[token("&")]
    Unescaped,
    #[token("!")]
    Comment,
    /// The tree builder handles `=` directives itself before classifying, so
    /// this only reaches direct callers of [`classify`]
    #[token("=")]
    SetDelimiter,
}

impl Sigil {
    pub fn kind(self) -> TagKind {
        match self {
            Sigil::Section => TagKind::SectionBegin,
            Sigil::InvertedSection => TagKind::SectionBeginInverted,
            Sigil::SectionEnd => TagKind::SectionEnd,
            Sigil::Partial => TagKind::Partial,
            Sigil::Unescaped => TagKind::UnescapedVariable,
            Sigil::Comment => TagKind::Comment,
            Sigil::SetDelimiter => TagKind::SetDelimiter,
        }
    }
}

/// Trim ASCII whitespace (space, tab, newline, vertical tab, form feed, CR)
pub fn trim_ascii(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b')
}

/// Classify already-trimmed tag content into a kind and a name
///
/// Content without a sigil is a variable named by the whole content. For
/// sigil'd content the name is what follows the sigil, trimmed again.
pub fn classify(content: &str) -> (TagKind, &str) {
    let mut lexer = Sigil::lexer(content);
    match lexer.next() {
        Some(Ok(sigil)) => (sigil.kind(), trim_ascii(lexer.remainder())),
        _ => (TagKind::Variable, content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigils() {
        let kinds: Vec<_> = ["#a", "^a", "/a", ">a", "&a", "!a", "=a"]
            .iter()
            .map(|c| classify(c).0)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TagKind::SectionBegin,
                TagKind::SectionBeginInverted,
                TagKind::SectionEnd,
                TagKind::Partial,
                TagKind::UnescapedVariable,
                TagKind::Comment,
                TagKind::SetDelimiter,
            ]
        );
    }

    #[test]
    fn test_plain_variable_keeps_full_content() {
        assert_eq!(classify("user name"), (TagKind::Variable, "user name"));
    }

    #[test]
    fn test_name_after_sigil_is_retrimmed() {
        assert_eq!(classify("#  items \t"), (TagKind::SectionBegin, "items"));
        assert_eq!(classify("& raw"), (TagKind::UnescapedVariable, "raw"));
    }

    #[test]
    fn test_empty_content_is_variable() {
        assert_eq!(classify(""), (TagKind::Variable, ""));
    }

    #[test]
    fn test_only_leading_sigil_counts() {
        assert_eq!(classify("a#b"), (TagKind::Variable, "a#b"));
        assert_eq!(classify("##x"), (TagKind::SectionBegin, "#x"));
    }

    #[test]
    fn test_trim_ascii() {
        assert_eq!(trim_ascii(" \t\n\x0b\x0c\r name \r\n"), "name");
        assert_eq!(trim_ascii("\u{a0}name"), "\u{a0}name");
    }
}
