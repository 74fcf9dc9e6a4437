//! Markdown rendering for generated notes.
//!
//! Covers the subset the generation provider emits: paragraphs, headings
//! (three levels), ordered and unordered lists, and bold emphasis. A small
//! parser builds a node tree; rendering walks it once, looking each node kind
//! up in a registry of rules, so new kinds are added by registration rather
//! than by growing the walker. The renderer memoizes on the (text, style
//! class) pair — streaming re-renders of unchanged content reuse the previous
//! output allocation.

mod parse;
mod render;

pub use parse::{Block, Inline, parse};
pub use render::{MarkdownRenderer, NodeKind, RenderRegistry, RenderRule};
