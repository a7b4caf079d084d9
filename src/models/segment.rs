//! Segment data types for marker-delimited documents
//!
//! A document is plain text carrying `<!-- SEGMENT: ... -->` comment markers.
//! Each marker opens a segment that runs until the next marker or the end of
//! the document. These types hold the parsed result; they never mutate the
//! text they describe.

use serde::{Deserialize, Serialize};

/// Dynamic content declaration: a function applied to other segments
///
/// Parsed from `dynamic="function:dep1,dep2"`. Dependencies are segment ids
/// in the order they were declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFunction {
    pub function: String,
    pub deps: Vec<String>,
}

impl DynamicFunction {
    pub fn new(function: impl Into<String>, deps: Vec<String>) -> Self {
        Self {
            function: function.into(),
            deps,
        }
    }
}

/// Metadata carried by a segment marker
///
/// Every attribute is optional in the marker; missing or malformed values
/// fall back to the defaults here. A segment with no marker at all (leading
/// text) gets `SegmentMetadata::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentMetadata {
    /// Explicit id, used for dynamic dependency lookups. Never empty.
    pub id: Option<String>,
    pub locked: bool,
    pub double_width: bool,
    pub dynamic: Option<DynamicFunction>,
}

impl SegmentMetadata {
    pub fn is_dynamic(&self) -> bool {
        self.dynamic.is_some()
    }

    /// Effective lock: dynamic segments are always locked, whatever the
    /// `locked` attribute said.
    pub fn is_locked(&self) -> bool {
        self.locked || self.dynamic.is_some()
    }
}

/// A contiguous span of the document
///
/// `start_pos..end_pos` are character offsets (not bytes) and include the
/// marker text; `content` is the text after the marker. Spans are half-open
/// and tile the document exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub content: String,
    pub metadata: SegmentMetadata,
    pub start_pos: usize,
    pub end_pos: usize,
}

impl TextSegment {
    pub fn new(
        content: impl Into<String>,
        metadata: SegmentMetadata,
        start_pos: usize,
        end_pos: usize,
    ) -> Self {
        Self {
            content: content.into(),
            metadata,
            start_pos,
            end_pos,
        }
    }

    /// Span length in characters (marker included)
    pub fn len(&self) -> usize {
        self.end_pos - self.start_pos
    }

    pub fn is_empty(&self) -> bool {
        self.end_pos == self.start_pos
    }

    /// Whether a character position falls inside this span
    pub fn contains(&self, pos: usize) -> bool {
        self.start_pos <= pos && pos < self.end_pos
    }

    /// Character offset where the content begins (just past the marker)
    pub fn content_start(&self) -> usize {
        self.end_pos - self.content.chars().count()
    }
}

/// Presentation-layer projection of a segment
///
/// What a frontend needs to render gutters, lock indicators, and width
/// styling without walking the full model. `locked` is the effective lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentInfo {
    pub id: Option<String>,
    pub locked: bool,
    pub double_width: bool,
    pub has_dynamic: bool,
    pub start_pos: usize,
    pub end_pos: usize,
}

impl From<&TextSegment> for SegmentInfo {
    fn from(segment: &TextSegment) -> Self {
        Self {
            id: segment.metadata.id.clone(),
            locked: segment.metadata.is_locked(),
            double_width: segment.metadata.double_width,
            has_dynamic: segment.metadata.is_dynamic(),
            start_pos: segment.start_pos,
            end_pos: segment.end_pos,
        }
    }
}
