//! Segment editor core
//!
//! Core library for an XML-oriented editor whose documents are divided
//! into segments by `<!-- SEGMENT: ... -->` comment markers. Segments can
//! be locked against editing or declared dynamic, with their content
//! computed by registered functions over other segments. The crate parses
//! markers into a position-indexed model, enforces edit permissions, and
//! orchestrates documents behind a manager plus a thin editor facade.

pub mod document;
pub mod dynamics;
pub mod editing;
pub mod editor;
pub mod models;
pub mod parse;
pub mod utils;

// Re-export commonly used types
pub use document::*;
pub use dynamics::*;
pub use editing::*;
pub use editor::*;
pub use models::*;
pub use parse::*;
