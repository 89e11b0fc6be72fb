//! Parser configuration.

/// How the parser reacts to a syntax error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Abort on the first error and return it.
    #[default]
    Strict,
    /// Record every error on the stylesheet and keep what was parsed.
    Tolerant,
}

/// Options accepted by [`parse_stylesheet_with`](crate::parse_stylesheet_with).
///
/// # Examples
///
/// ```rust
/// use cssast::{ErrorMode, ParseOptions};
///
/// let options = ParseOptions::new().with_source("theme.css").tolerant();
/// assert_eq!(options.source.as_deref(), Some("theme.css"));
/// assert_eq!(options.mode, ErrorMode::Tolerant);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Name recorded in every node position and error, usually a file path.
    pub source: Option<String>,
    pub mode: ErrorMode,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Collect errors instead of aborting on the first one.
    pub fn tolerant(mut self) -> Self {
        self.mode = ErrorMode::Tolerant;
        self
    }

    pub fn strict(mut self) -> Self {
        self.mode = ErrorMode::Strict;
        self
    }

    pub fn is_tolerant(&self) -> bool {
        self.mode == ErrorMode::Tolerant
    }
}
