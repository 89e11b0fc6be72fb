//! Position-annotated CSS syntax trees.
//!
//! This crate re-exports [`cssast`], which holds the parser, the tree types
//! and the error types.
//!
//! ```rust
//! use cssast_rs::{NodeKind, parse_stylesheet};
//!
//! let sheet = parse_stylesheet("@keyframes spin { from { top: 0 } to { top: 10px } }").unwrap();
//! assert_eq!(sheet.rules[0].kind(), NodeKind::Keyframes);
//! ```

pub use cssast::*;
