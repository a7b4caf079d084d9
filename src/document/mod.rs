//! Document module for the segment editor
//!
//! This module contains the document manager that owns the text and its
//! derived state, plus the XML helpers behind the styled view.

pub mod manager;
pub mod xml;

// Re-export commonly used types
pub use manager::*;
pub use xml::*;
