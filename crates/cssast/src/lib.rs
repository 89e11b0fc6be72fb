//! # cssast - CSS to syntax tree
//!
//! Parses CSS source text into a position-annotated syntax tree. Every node
//! remembers the line/column range it came from, and a side table links each
//! node to its enclosing node.
//!
//! ## Quick Start
//!
//! ```rust
//! use cssast::{Node, parse_stylesheet};
//!
//! let sheet = parse_stylesheet(
//!     r#"
//!     @media (min-width: 1px) {
//!         .a { color: red }
//!     }
//!     "#,
//! )
//! .expect("valid CSS");
//!
//! let Node::Media(media) = &sheet.rules[0] else { panic!("expected @media") };
//! assert_eq!(media.media, "(min-width: 1px)");
//!
//! let rule = media.rules[0].as_rule().unwrap();
//! assert_eq!(rule.selectors, vec![".a"]);
//! ```
//!
//! ## Error Modes
//!
//! In strict mode (the default) the first syntax error aborts the parse and
//! is returned. In tolerant mode errors are collected on
//! [`Stylesheet::parsing_errors`] and whatever parsed cleanly is kept:
//!
//! ```rust
//! use cssast::{ParseOptions, parse_stylesheet_with};
//!
//! let options = ParseOptions::new().tolerant();
//! let sheet = parse_stylesheet_with("a { color: red } /* oops", &options).unwrap();
//! assert_eq!(sheet.rules.len(), 1);
//! assert_eq!(sheet.parsing_errors[0].reason(), "End of comment missing");
//! ```
//!
//! ## Supported Syntax
//!
//! - Rules with comma-separated selector lists
//! - Declarations, including `*prop` hacks and values with quoted or
//!   parenthesized `;`/`}`
//! - Block comments, kept as nodes between rules and declarations
//! - `@media`, `@supports`, `@host`, `@document` (vendor prefixed too)
//! - `@page`, `@font-face`
//! - `@keyframes` (vendor prefixed too)
//! - `@import`, `@charset`, `@namespace`, `@custom-media`
//!
//! Selectors and values are kept as text. Nothing here validates
//! properties, interprets values or computes specificity.
//!
//! ## Modules
//!
//! - [`ast`]: The syntax tree, positions and parent links
//! - [`parser`]: The grammar
//! - [`error`]: Error types
//! - [`options`]: Parser configuration

pub mod ast;
pub mod error;
pub mod options;
pub mod parser;

use std::path::Path;

pub use ast::{
    Charset, Comment, CustomMedia, Declaration, Document, FontFace, Host, Import, Keyframe,
    Keyframes, Location, Media, Namespace, Node, NodeId, NodeKind, NodeRef, Page, ParentLinks,
    Position, Rule, Stylesheet, Supports,
};
pub use error::{Construct, CssError, ParseError, SyntaxError};
pub use options::{ErrorMode, ParseOptions};

use parser::Parser;

/// Parses `css` in strict mode without a source name.
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet, ParseError> {
    parse_stylesheet_with(css, &ParseOptions::default())
}

/// Parses `css` with the given options.
///
/// In tolerant mode the result is always `Ok`; errors land on
/// [`Stylesheet::parsing_errors`] instead.
pub fn parse_stylesheet_with(css: &str, options: &ParseOptions) -> Result<Stylesheet, ParseError> {
    Parser::new(css, options).parse()
}

/// Reads and parses a stylesheet file.
///
/// The path becomes the source name unless `options` already sets one.
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Stylesheet, CssError> {
    let path = path.as_ref();
    let css = std::fs::read_to_string(path)?;

    let sheet = if options.source.is_some() {
        parse_stylesheet_with(&css, options)?
    } else {
        let options = options.clone().with_source(path.display().to_string());
        parse_stylesheet_with(&css, &options)?
    };
    Ok(sheet)
}
