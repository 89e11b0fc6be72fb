//! The recursive-descent CSS grammar.
//!
//! Lexing and parsing are fused: every grammar function asks the shared
//! [`Cursor`] to match a nom pattern against the remaining input and builds
//! nodes from what matched.
//!
//! ## Submodules
//!
//! - [`cursor`]: position tracking and the `matches` primitive
//! - [`comments`]: `/* ... */` blocks and comment stripping
//! - [`selectors`]: selector lists up to `{`
//! - [`declarations`]: `property: value` pairs and declaration blocks
//! - [`rules`]: plain rules and the stylesheet loop
//! - [`at_rules`]: the `@` dispatch table and one recognizer per at-rule
//!
//! ## Outcomes
//!
//! A grammar function returns [`Step<T>`]:
//!
//! - `Ok(Some(node))` when it matched,
//! - `Ok(None)` when its opening pattern did not match (nothing consumed),
//! - `Err(Halt)` when it matched an opening but the rest was malformed.
//!
//! In strict mode the halt carries the [`ParseError`] and unwinds the whole
//! parse. In tolerant mode the error has already been recorded and the
//! innermost list-building loop simply stops collecting.

pub mod at_rules;
pub mod comments;
pub mod cursor;
pub mod declarations;
pub mod rules;
pub mod selectors;

use std::sync::Arc;

use nom::IResult;
use nom::character::complete::char;
use nom::sequence::terminated;

use crate::ast::{Location, Position, Stylesheet};
use crate::error::{ParseError, SyntaxError};
use crate::options::{ErrorMode, ParseOptions};

pub use cursor::{Cursor, Mark};

/// Why a grammar function stopped without producing a node.
#[derive(Debug)]
pub enum Halt {
    /// Strict mode: the error unwinds to the caller.
    Raised(ParseError),
    /// Tolerant mode: the error is already on the error list.
    Recorded,
}

impl From<ParseError> for Halt {
    fn from(err: ParseError) -> Self {
        Halt::Raised(err)
    }
}

pub type Step<T> = Result<Option<T>, Halt>;

/// Ends a list-building loop.
///
/// A recorded error only stops the loop, so everything collected before it
/// is kept; a raised error keeps unwinding.
pub fn settle(collected: Result<(), Halt>) -> Result<(), ParseError> {
    match collected {
        Ok(()) | Err(Halt::Recorded) => Ok(()),
        Err(Halt::Raised(err)) => Err(err),
    }
}

/// Grammar state for one parse: the cursor plus error bookkeeping.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    source: Option<Arc<str>>,
    mode: ErrorMode,
    errors: Vec<ParseError>,
    /// Where an unterminated comment was reported, so lists that stop at
    /// the same `/*` later do not report it again.
    unterminated_comment: Option<Location>,
}

impl<'a> Parser<'a> {
    pub fn new(css: &'a str, options: &ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(css),
            source: options.source.as_deref().map(Arc::from),
            mode: options.mode,
            errors: Vec::new(),
            unterminated_comment: None,
        }
    }

    /// Parses the whole input into a linked stylesheet.
    pub fn parse(mut self) -> Result<Stylesheet, ParseError> {
        log::debug!(
            "parsing stylesheet {} ({:?} mode)",
            self.source.as_deref().unwrap_or("<anonymous>"),
            self.mode
        );
        let rules = self.rules()?;
        log::debug!(
            "parsed {} top-level nodes with {} recorded errors",
            rules.len(),
            self.errors.len()
        );
        Ok(Stylesheet::new(self.source, rules, self.errors))
    }

    /// Builds an error at the current location.
    fn error(&self, kind: SyntaxError) -> ParseError {
        let here = self.cursor.location();
        ParseError::new(kind, self.source.clone(), here.line, here.column)
    }

    /// Reports an error without giving up on the current construct.
    ///
    /// Strict mode returns the error; tolerant mode records it and returns
    /// `Ok(())`.
    fn report(&mut self, kind: SyntaxError) -> Result<(), ParseError> {
        let err = self.error(kind);
        match self.mode {
            ErrorMode::Strict => Err(err),
            ErrorMode::Tolerant => {
                log::warn!("{err}");
                self.errors.push(err);
                Ok(())
            }
        }
    }

    /// Reports an error and abandons the current construct.
    fn fail<T>(&mut self, kind: SyntaxError) -> Result<T, Halt> {
        self.report(kind)?;
        Err(Halt::Recorded)
    }

    /// Closes the node started at `mark` and skips trailing whitespace.
    fn span(&mut self, mark: Mark) -> Position {
        let position = Position::new(mark.0, self.cursor.location(), self.source.clone());
        self.cursor.skip_whitespace();
        position
    }

    fn open_brace(&mut self) -> bool {
        self.cursor.matches(left_brace).is_some()
    }

    fn close_brace(&mut self) -> bool {
        self.cursor.matches(right_brace).is_some()
    }
}

/// `{` and any whitespace after it.
fn left_brace(input: &str) -> IResult<&str, char> {
    terminated(char('{'), cursor::whitespace)(input)
}

fn right_brace(input: &str) -> IResult<&str, char> {
    char('}')(input)
}

/// Where a quoted string may end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Quoting {
    /// Declaration values: the string must close on the same line, at the
    /// earliest possible quote.
    Value,
    /// Selectors: the string may span lines and, failing an unescaped closer,
    /// extends to the last quote available.
    Selector,
}

/// Byte length of the quoted string at the start of `text`, both quotes
/// included, or `None` if `text` does not start with a closed string.
///
/// A backslash directly before the quote character escapes it. If no
/// unescaped closer exists, an escaped quote is accepted as the closer.
pub(crate) fn quoted_len(text: &str, quote: char, quoting: Quoting) -> Option<usize> {
    let body = text.strip_prefix(quote)?;
    let open = quote.len_utf8();
    let limit = match quoting {
        Quoting::Value => body
            .find(['\n', '\r', '\u{2028}', '\u{2029}'])
            .unwrap_or(body.len()),
        Quoting::Selector => body.len(),
    };
    let body = &body[..limit];

    let mut chars = body.char_indices();
    while let Some((index, c)) = chars.next() {
        if c == '\\' && body[index + 1..].starts_with(quote) {
            chars.next();
        } else if c == quote {
            return Some(open + index + quote.len_utf8());
        }
    }

    let fallback = match quoting {
        Quoting::Value => body.find(quote),
        Quoting::Selector => body.rfind(quote),
    };
    fallback.map(|index| open + index + quote.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_len_includes_both_quotes() {
        assert_eq!(quoted_len("'abc' x", '\'', Quoting::Value), Some(5));
    }

    #[test]
    fn quoted_len_skips_escaped_quotes() {
        assert_eq!(quoted_len(r#""a\"b" x"#, '"', Quoting::Value), Some(6));
    }

    #[test]
    fn value_strings_stop_at_line_breaks() {
        assert_eq!(quoted_len("'ab\ncd'", '\'', Quoting::Value), None);
        assert_eq!(quoted_len("'ab\ncd'", '\'', Quoting::Selector), Some(7));
    }

    #[test]
    fn escaped_quote_closes_when_nothing_else_does() {
        assert_eq!(quoted_len(r"'a\'", '\'', Quoting::Value), Some(4));
    }

    #[test]
    fn quoted_len_requires_leading_quote() {
        assert_eq!(quoted_len("abc'", '\'', Quoting::Value), None);
    }
}
