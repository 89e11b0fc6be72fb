//! Selector lists.
//!
//! A selector list is everything up to the next `{`, split on the commas that
//! separate complex selectors. Selectors are kept as text; nothing here
//! interprets combinators or computes specificity.

use nom::IResult;
use nom::bytes::complete::is_not;

use crate::parser::comments::strip_comments;
use crate::parser::{Parser, Quoting, quoted_len};

/// Stands in for commas inside quoted strings while the list is split.
/// Zero-width non-joiner never appears in a meaningful selector.
const COMMA_PLACEHOLDER: char = '\u{200C}';

impl<'a> Parser<'a> {
    /// Consumes text up to the next `{` and splits it into selectors.
    ///
    /// Returns `None` when the input starts with `{` or is exhausted.
    pub(crate) fn selector(&mut self) -> Option<Vec<String>> {
        let raw = self.cursor.matches(selector_text)?;
        Some(split_selectors(raw))
    }
}

fn selector_text(input: &str) -> IResult<&str, &str> {
    is_not("{")(input)
}

/// Splits a raw selector list such as `a, b > c` into `["a", "b > c"]`.
///
/// Comments are removed first. Commas inside quoted strings or inside an
/// open parenthesis group (`:is(a, b)`) do not split.
///
/// # Examples
///
/// ```rust
/// use cssast::parser::selectors::split_selectors;
///
/// assert_eq!(split_selectors("a, b"), vec!["a", "b"]);
/// assert_eq!(
///     split_selectors(r#"a[data-x="a,b"], c"#),
///     vec![r#"a[data-x="a,b"]"#, "c"]
/// );
/// ```
pub fn split_selectors(raw: &str) -> Vec<String> {
    let cleaned = strip_comments(raw.trim(), true);
    let masked = mask_quoted_commas(&cleaned);

    split_outside_parens(&masked)
        .into_iter()
        .map(|selector| selector.replace(COMMA_PLACEHOLDER, ",").trim().to_string())
        .collect()
}

fn mask_quoted_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        let quoted = match c {
            '"' | '\'' => quoted_len(rest, c, Quoting::Selector),
            _ => None,
        };
        let len = match quoted {
            Some(len) => {
                out.push_str(&rest[..len].replace(',', &COMMA_PLACEHOLDER.to_string()));
                len
            }
            None => {
                out.push(c);
                c.len_utf8()
            }
        };
        rest = &rest[len..];
    }

    out
}

/// Splits on commas unless a `)` closes before any `(` opens after the comma.
fn split_outside_parens(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;

    for (index, c) in text.char_indices() {
        if c != ',' {
            continue;
        }
        let after = &text[index + 1..];
        let inside_group = after
            .find(['(', ')'])
            .is_some_and(|paren| after[paren..].starts_with(')'));
        if !inside_group {
            parts.push(&text[start..index]);
            start = index + 1;
        }
    }

    parts.push(&text[start..]);
    parts
}
