//! HTML escaping for variable output

use std::borrow::Cow;

/// Replace `& < > " '` with their HTML entities
pub fn escape_html(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find(['&', '<', '>', '"', '\'']) else {
        return Cow::Borrowed(s);
    };

    let mut escaped = String::with_capacity(s.len() * 2);
    escaped.push_str(&s[..first]);
    for ch in s[first..].chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_all_five() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &apos;Jerry&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed("plain text")));
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(escape_html("café <b>"), "café &lt;b&gt;");
    }
}
