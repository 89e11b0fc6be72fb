//! Block comments.
//!
//! Comments are kept as nodes wherever the grammar allows a run of them:
//! before and between rules, inside declaration blocks and between keyframe
//! entries. Comments embedded in selectors, property names or values are
//! stripped from the text instead.

use nom::IResult;
use nom::bytes::complete::{tag, take_until};
use nom::sequence::delimited;

use crate::ast::{Comment, Node};
use crate::error::SyntaxError;
use crate::parser::{Halt, Parser, Step};

impl<'a> Parser<'a> {
    /// Parses one `/* ... */` comment.
    pub(crate) fn comment(&mut self) -> Step<Comment> {
        let mark = self.cursor.mark();
        if !self.cursor.starts_with("/*") {
            return Ok(None);
        }

        let Some(text) = self.cursor.matches(comment_body) else {
            if self.unterminated_comment == Some(mark.0) {
                return Err(Halt::Recorded);
            }
            self.unterminated_comment = Some(mark.0);
            return self.fail(SyntaxError::UnterminatedComment);
        };

        Ok(Some(Comment {
            comment: text.to_string(),
            position: self.span(mark),
        }))
    }

    /// Appends every consecutive comment to `out`.
    ///
    /// An unterminated comment halts the caller's list as well, since
    /// nothing after it can be parsed. It is reported only the first time
    /// a list runs into it.
    pub(crate) fn comments(&mut self, out: &mut Vec<Node>) -> Result<(), Halt> {
        while let Some(comment) = self.comment()? {
            out.push(Node::Comment(comment));
        }
        Ok(())
    }
}

/// The interior of a comment; the delimiters are consumed but not returned.
fn comment_body(input: &str) -> IResult<&str, &str> {
    delimited(tag("/*"), take_until("*/"), tag("*/"))(input)
}

/// Removes every complete `/* ... */` from `text`.
///
/// An unterminated opener is left in place. With `trailing_slashes`, any run
/// of `/` directly after a closer goes with it, as selector cleanup expects.
pub(crate) fn strip_comments(text: &str, trailing_slashes: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("/*") {
        let Some(close) = rest[open + 2..].find("*/") else {
            break;
        };
        out.push_str(&rest[..open]);
        let mut end = open + 2 + close + 2;
        if trailing_slashes {
            end += rest[end..].len() - rest[end..].trim_start_matches('/').len();
        }
        rest = &rest[end..];
    }

    out.push_str(rest);
    out
}
