//! Position-tracking view over the unparsed input.
//!
//! The cursor is the only thing that moves through the source. Grammar
//! functions hand it a nom pattern; if the pattern matches a prefix of the
//! remaining text the cursor steps over that prefix and updates its
//! line/column, otherwise nothing changes.

use nom::IResult;
use nom::bytes::complete::take_while;

use crate::ast::Location;

/// A start marker taken before a node is parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark(pub(crate) Location);

#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    rest: &'a str,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            line: 1,
            column: 1,
        }
    }

    /// The unconsumed suffix of the input.
    pub fn rest(&self) -> &'a str {
        self.rest
    }

    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest.starts_with(prefix)
    }

    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    pub fn mark(&self) -> Mark {
        Mark(self.location())
    }

    /// Applies `pattern` to the remaining input.
    ///
    /// On success the matched prefix is consumed and the pattern's output is
    /// returned. On failure the cursor is left untouched and `None` comes
    /// back; a failed match is not an error.
    pub fn matches<O, P>(&mut self, mut pattern: P) -> Option<O>
    where
        P: FnMut(&'a str) -> IResult<&'a str, O>,
    {
        let (rest, output) = pattern(self.rest).ok()?;
        let consumed = &self.rest[..self.rest.len() - rest.len()];
        self.advance(consumed);
        self.rest = rest;
        Some(output)
    }

    pub fn skip_whitespace(&mut self) {
        self.matches(whitespace);
    }

    fn advance(&mut self, consumed: &str) {
        match consumed.rfind('\n') {
            Some(index) => {
                self.line += consumed.matches('\n').count();
                self.column = consumed[index + 1..].chars().count() + 1;
            }
            None => self.column += consumed.chars().count(),
        }
    }
}

/// Zero or more whitespace characters.
pub fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}
