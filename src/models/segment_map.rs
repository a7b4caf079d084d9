//! Ordered segment collection with position and id lookups
//!
//! The model is a read-only snapshot: it is rebuilt from scratch by the
//! parser whenever the document text changes, never edited in place.

use serde::{Deserialize, Serialize};

use super::segment::{SegmentInfo, SegmentMetadata, TextSegment};

/// Parsed segment structure of one document
///
/// Segments are ordered by `start_pos`, non-overlapping, and tile the
/// document exactly: the first starts at 0, each starts where the previous
/// ended, the last ends at `document_len`. There is always at least one
/// segment, even for an empty document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentModel {
    segments: Vec<TextSegment>,
    document_len: usize,
}

impl SegmentModel {
    /// Build a model from parser output. Callers are expected to have
    /// verified the tiling invariant first.
    pub fn new(segments: Vec<TextSegment>, document_len: usize) -> Self {
        Self {
            segments,
            document_len,
        }
    }

    /// Model of an empty document: one empty implicit segment
    pub fn empty() -> Self {
        Self {
            segments: vec![TextSegment::new("", SegmentMetadata::default(), 0, 0)],
            document_len: 0,
        }
    }

    pub fn segments(&self) -> &[TextSegment] {
        &self.segments
    }

    /// Number of segments (never 0)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Document length in characters
    pub fn document_len(&self) -> usize {
        self.document_len
    }

    /// Find the segment containing a character position
    ///
    /// `position == document_len` resolves to the last segment, so a cursor
    /// sitting at the very end of the document still has a segment. Anything
    /// past that is out of range and returns `None`.
    pub fn segment_at(&self, position: usize) -> Option<&TextSegment> {
        if position > self.document_len {
            return None;
        }
        if position == self.document_len {
            return self.segments.last();
        }
        // Documents stay small enough that a linear scan is fine
        self.segments.iter().find(|segment| segment.contains(position))
    }

    /// Find a segment by its explicit id
    ///
    /// When several segments declare the same id, the latest-declared one
    /// wins. Segments without an id are not addressable here.
    pub fn segment_by_id(&self, id: &str) -> Option<&TextSegment> {
        self.segments
            .iter()
            .rev()
            .find(|segment| segment.metadata.id.as_deref() == Some(id))
    }

    /// Projection of all segments for a presentation layer
    pub fn segments_info(&self) -> Vec<SegmentInfo> {
        self.segments.iter().map(SegmentInfo::from).collect()
    }
}

impl Default for SegmentModel {
    fn default() -> Self {
        Self::empty()
    }
}
