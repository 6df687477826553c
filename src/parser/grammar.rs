//! Set-delimiter directive parsing using chumsky
//!
//! A directive looks like `=BEGIN END=`: an equals sign, the new opening
//! delimiter, exactly one space, the new closing delimiter, and a final
//! equals sign. Neither delimiter may be empty or contain a space.

use chumsky::prelude::*;

/// Smallest legal directive is `=X X=`
const MIN_DIRECTIVE_LEN: usize = 5;

/// New delimiter pair requested by a `{{=BEGIN END=}}` tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterChange {
    pub begin: String,
    pub end: String,
}

/// Parse trimmed tag content starting with `=`
///
/// Returns `None` for any shape other than `=BEGIN END=`.
pub fn parse_delimiter_change(content: &str) -> Option<DelimiterChange> {
    if content.len() < MIN_DIRECTIVE_LEN {
        return None;
    }

    delimiter_change_parser()
        .parse(content)
        .into_result()
        .ok()
}

fn delimiter_change_parser<'a>(
) -> impl Parser<'a, &'a str, DelimiterChange, extra::Err<Rich<'a, char>>> {
    let token = none_of(" ").repeated().at_least(1).collect::<String>();

    // The closing token swallows the trailing `=`, which is split off below
    just('=')
        .ignore_then(token.clone())
        .then_ignore(just(' '))
        .then(token)
        .then_ignore(end())
        .try_map(|(begin, closing), span| match closing.strip_suffix('=') {
            Some(close) if !close.is_empty() => Ok(DelimiterChange {
                begin,
                end: close.to_string(),
            }),
            _ => Err(Rich::custom(span, "set delimiter tag must end with '='")),
        })
}
