//! Parsing module for the segment editor
//!
//! This module contains the marker grammar and the document scanner
//! that turns raw text into the segment model.

pub mod marker;
pub mod segments;

// Re-export commonly used types
pub use marker::*;
pub use segments::*;
