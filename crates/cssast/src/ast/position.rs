use std::fmt;
use std::sync::Arc;

/// A point in the source text. Both fields are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The source range a node was parsed from.
///
/// `end` points just past the node's last consumed character, so
/// `start <= end` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub start: Location,
    pub end: Location,
    /// The source name given in [`ParseOptions`](crate::ParseOptions), if any.
    pub source: Option<Arc<str>>,
}

impl Position {
    pub fn new(start: Location, end: Location, source: Option<Arc<str>>) -> Self {
        debug_assert!(start <= end, "position ends before it starts");
        Self { start, end, source }
    }

    /// Number of lines the range touches.
    pub fn line_count(&self) -> usize {
        self.end.line - self.start.line + 1
    }
}
