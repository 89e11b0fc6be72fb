//! Declarations and declaration blocks.
//!
//! A declaration is `property: value` followed by any number of `;`. The
//! value runs until an unquoted, unparenthesized `}` or `;`, so
//! `url("a;b")` and `format(a;b)` stay intact.

use nom::IResult;
use nom::bytes::complete::{take_while, take_while1};
use nom::character::complete::char;
use nom::combinator::{opt, recognize};
use nom::error::{Error, ErrorKind};
use nom::sequence::{delimited, terminated, tuple};

use crate::ast::{Declaration, Node};
use crate::error::{Construct, ParseError, SyntaxError};
use crate::parser::comments::strip_comments;
use crate::parser::cursor::whitespace;
use crate::parser::{Halt, Parser, Quoting, Step, quoted_len, settle};

impl<'a> Parser<'a> {
    /// Parses one `property: value;` pair.
    pub(crate) fn declaration(&mut self) -> Step<Declaration> {
        let mark = self.cursor.mark();

        let Some(property) = self.cursor.matches(property) else {
            return Ok(None);
        };
        if self.cursor.matches(colon).is_none() {
            return self.fail(SyntaxError::MissingColon);
        }
        let value = self.cursor.matches(value);
        let position = self.span(mark);

        let declaration = Declaration {
            property: strip_comments(property.trim(), false),
            value: value
                .map(|value| strip_comments(value.trim(), false))
                .unwrap_or_default(),
            position,
        };

        self.cursor.matches(semicolons);
        Ok(Some(declaration))
    }

    /// Collects comments and declarations until no declaration matches.
    ///
    /// A declaration that fails part-way ends the list; everything collected
    /// before it is kept.
    pub(crate) fn declaration_list(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut declarations = Vec::new();
        settle(self.collect_declarations(&mut declarations))?;
        Ok(declarations)
    }

    fn collect_declarations(&mut self, out: &mut Vec<Node>) -> Result<(), Halt> {
        self.comments(out)?;
        while let Some(declaration) = self.declaration()? {
            out.push(Node::Declaration(declaration));
            self.comments(out)?;
        }
        Ok(())
    }

    /// Parses a braced declaration block for a rule or keyframe.
    ///
    /// A missing `{` fails the block. A missing `}` is reported, but the
    /// declarations parsed so far are still returned.
    pub(crate) fn declarations(&mut self) -> Result<Vec<Node>, Halt> {
        if !self.open_brace() {
            return self.fail(SyntaxError::MissingOpenBrace(Construct::Block));
        }

        let declarations = self.declaration_list()?;

        if !self.close_brace() {
            self.report(SyntaxError::MissingCloseBrace(Construct::Block))?;
        }

        Ok(declarations)
    }
}

fn is_property_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '#' | '/' | '*' | '\\')
}

fn is_attribute_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_lowercase() || c == '_' || c == '-'
}

/// A property name: an optional `*` hack, the name itself and an optional
/// `[attr]` suffix, plus trailing whitespace.
fn property(input: &str) -> IResult<&str, &str> {
    terminated(
        recognize(tuple((
            opt(char('*')),
            take_while1(is_property_char),
            opt(delimited(char('['), take_while1(is_attribute_char), char(']'))),
        ))),
        whitespace,
    )(input)
}

fn colon(input: &str) -> IResult<&str, char> {
    terminated(char(':'), whitespace)(input)
}

/// The value text: quoted strings, parenthesized groups and any other
/// characters up to the first bare `}` or `;`.
fn value(input: &str) -> IResult<&str, &str> {
    let mut end = 0;

    while let Some(c) = input[end..].chars().next() {
        let rest = &input[end..];
        let group = match c {
            '\'' | '"' => quoted_len(rest, c, Quoting::Value),
            '(' => rest.find(')').map(|close| close + 1),
            _ => None,
        };
        match group {
            Some(len) => end += len,
            None if c == '}' || c == ';' => break,
            None => end += c.len_utf8(),
        }
    }

    if end == 0 {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::TakeWhile1)));
    }
    Ok((&input[end..], &input[..end]))
}

fn semicolons(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == ';' || c.is_whitespace())(input)
}
