//! Utility modules for the segment editor
//!
//! This module contains small helpers shared by the parser and the
//! document manager.

pub mod text;

// Re-export commonly used types
pub use text::*;
