//! Editing rules module for the segment editor
//!
//! This module contains the edit permission checks for locked segments
//! and the line-oriented typing constraints.

pub mod constraints;
pub mod guard;

// Re-export commonly used types
pub use constraints::*;
pub use guard::*;
