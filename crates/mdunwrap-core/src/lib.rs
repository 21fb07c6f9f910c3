//! mdunwrap-core: Core library for removing artificial line wrapping from Markdown
//!
//! This crate provides:
//! - A CommonMark parsing boundary (comrak arena AST + depth-first walk)
//! - A prefix stack tracking nested list/blockquote indentation
//! - Escaping of Markdown-significant character sequences
//! - An event-stream renderer producing canonical, unwrapped Markdown
//!
//! Most callers only need [`unwrap_markdown`].

pub mod escape;
pub mod parser;
pub mod prefix;
pub mod writer;

pub use escape::escape_text;
pub use parser::{WalkEvent, parse_markdown, walk};
pub use prefix::PrefixStack;
pub use writer::render;

use comrak::Arena;

/// Canonicalize `source`: parse it as CommonMark and render it back with
/// soft line breaks collapsed, one logical line per paragraph.
///
/// Deterministic: the same input always yields byte-identical output, and
/// the output is a fixed point (unwrapping the result returns it unchanged).
pub fn unwrap_markdown(source: &str) -> String {
    let arena = Arena::new();
    let root = parser::parse_markdown(&arena, source);
    writer::render(root)
}
