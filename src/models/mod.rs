//! Models module for the segment editor
//!
//! This module contains the segment data types and the parsed
//! document model shared across the crate.

pub mod segment;
pub mod segment_map;

// Re-export commonly used types
pub use segment::*;
pub use segment_map::*;
