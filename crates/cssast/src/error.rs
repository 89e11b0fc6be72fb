//! Error types for CSS parsing.
//!
//! Every syntax problem the grammar can detect is a [`SyntaxError`]. The
//! parser wraps it in a [`ParseError`] that remembers where it happened, and
//! file-based entry points widen that into [`CssError`] so I/O failures share
//! one error type with syntax failures.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// The construct whose brace was missing.
///
/// Plain rules and keyframe entries report a bare `missing '{'`, at-rules
/// prefix the message with their keyword (`@media missing '{'`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Construct {
    /// A declaration block belonging to a rule or keyframe.
    Block,
    /// An at-rule, named without the leading `@`.
    AtRule(&'static str),
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::Block => Ok(()),
            Construct::AtRule(name) => write!(f, "@{name} "),
        }
    }
}

/// The reason a stylesheet failed to parse.
///
/// The `Display` output is the reason text carried by [`ParseError::reason`].
///
/// # Examples
///
/// ```rust
/// use cssast::{Construct, SyntaxError};
///
/// assert_eq!(SyntaxError::MissingColon.to_string(), "property missing ':'");
/// assert_eq!(
///     SyntaxError::MissingOpenBrace(Construct::AtRule("media")).to_string(),
///     "@media missing '{'"
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum SyntaxError {
    /// A `/*` without a matching `*/`.
    #[error("End of comment missing")]
    UnterminatedComment,

    /// A plain rule with nothing before its `{`.
    #[error("selector missing")]
    MissingSelector,

    /// A property name that is not followed by `:`.
    #[error("property missing ':'")]
    MissingColon,

    #[error("{0}missing '{{'")]
    MissingOpenBrace(Construct),

    #[error("{0}missing '}}'")]
    MissingCloseBrace(Construct),

    /// `@keyframes` without an identifier.
    #[error("@keyframes missing name")]
    MissingKeyframesName,
}

/// A syntax error together with the location it was detected at.
///
/// In strict mode the first `ParseError` is returned to the caller; in
/// tolerant mode they accumulate on
/// [`Stylesheet::parsing_errors`](crate::Stylesheet::parsing_errors).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}:{line}:{column}: {kind}", display_filename(.filename))]
pub struct ParseError {
    pub kind: SyntaxError,
    pub filename: Option<Arc<str>>,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(kind: SyntaxError, filename: Option<Arc<str>>, line: usize, column: usize) -> Self {
        Self {
            kind,
            filename,
            line,
            column,
        }
    }

    /// The bare reason text, e.g. `property missing ':'`.
    pub fn reason(&self) -> String {
        self.kind.to_string()
    }

    /// The full message, `<filename>:<line>:<column>: <reason>`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn display_filename(filename: &Option<Arc<str>>) -> &str {
    filename.as_deref().unwrap_or("<anonymous>")
}

/// Errors returned by the file-based entry points.
#[derive(Debug, Error)]
pub enum CssError {
    /// The stylesheet text was read but is not valid CSS.
    #[error(transparent)]
    Syntax(#[from] ParseError),

    /// An I/O error occurred while reading a stylesheet file.
    #[error("I/O error reading stylesheet")]
    Io(#[from] std::io::Error),
}
