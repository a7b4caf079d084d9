//! Dynamic content module for the segment editor
//!
//! This module contains the function registry and the evaluator that
//! computes dynamic segment content from other segments.

pub mod evaluator;
pub mod registry;

// Re-export commonly used types
pub use evaluator::*;
pub use registry::*;
