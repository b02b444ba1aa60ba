//! # mdlint_parser
//!
//! Markdown document model for mdlint.
//!
//! This crate provides:
//! - A `MarkdownParser` built on `markdown-rs` (mdast, GFM + front matter)
//! - A `Document` exposing lines, headings, code blocks, tables and front
//!   matter with 1-based line/column positions
//!
//! Rules never see the mdast tree directly. The parser flattens the parts
//! that rules care about into plain structures so that a rule only needs a
//! shared `&Document`.
//!
//! ## Example
//!
//! ```rust
//! use mdlint_parser::MarkdownParser;
//!
//! let parser = MarkdownParser::new();
//! let doc = parser.parse("# Hello\n\nSome text.\n").unwrap();
//!
//! assert_eq!(doc.line_count(), 3);
//! assert_eq!(doc.headings()[0].text, "Hello");
//! ```

mod document;
mod error;
mod lines;
mod markdown;

pub use document::{CodeBlock, Document, Heading, LineKind, LineRange};
pub use error::ParseError;
pub use markdown::MarkdownParser;
