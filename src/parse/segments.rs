//! Document segmentation
//!
//! Scans a document for segment markers and produces the segment model.
//! Every position is a character offset. The produced spans tile the whole
//! document: leading text before the first marker becomes an implicit
//! segment, and each marker opens a segment that includes the marker text
//! and runs to the next marker or the end of the document.

use thiserror::Error;

use super::marker::{parse_marker_attrs, MarkerAttrs, MARKER_RE};
use crate::models::{SegmentMetadata, SegmentModel, TextSegment};
use crate::utils::char_len;

/// Catastrophic parse failure
///
/// Malformed markers and attributes never produce this; they degrade to
/// plain text or default metadata. The only failure mode is the produced
/// spans not tiling the document, which would mean a scanner bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("segment spans do not tile the document: expected offset {expected}, found {found}")]
    BrokenCoverage { expected: usize, found: usize },
}

/// One marker occurrence during the scan
struct MarkerHit {
    char_start: usize,
    byte_start: usize,
    byte_end: usize,
    attrs: MarkerAttrs,
}

/// Parse a document into its segment model
///
/// Never fails on malformed input: text without markers (or an empty
/// document) parses to a single implicit segment. The returned model always
/// satisfies the tiling invariant, which is verified before returning.
pub fn parse_document(text: &str) -> Result<SegmentModel, ParseError> {
    let total_chars = char_len(text);
    let segments = scan(text, total_chars);
    check_coverage(&segments, total_chars)?;

    log::debug!(
        "parsed {} segment(s) over {} chars",
        segments.len(),
        total_chars
    );
    Ok(SegmentModel::new(segments, total_chars))
}

fn scan(text: &str, total_chars: usize) -> Vec<TextSegment> {
    let mut hits = Vec::new();

    // Walk matches once, tracking byte and char offsets together so the
    // conversion stays linear in the document size.
    let mut last_byte = 0;
    let mut last_char = 0;
    for caps in MARKER_RE.captures_iter(text) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        let body = caps.get(1).map_or("", |g| g.as_str());

        let char_start = last_char + char_len(&text[last_byte..whole.start()]);
        last_char = char_start + char_len(whole.as_str());
        last_byte = whole.end();

        hits.push(MarkerHit {
            char_start,
            byte_start: whole.start(),
            byte_end: whole.end(),
            attrs: parse_marker_attrs(body),
        });
    }

    if hits.is_empty() {
        // Whole document is one implicit segment (possibly empty)
        return vec![TextSegment::new(
            text,
            SegmentMetadata::default(),
            0,
            total_chars,
        )];
    }

    let mut segments = Vec::with_capacity(hits.len() + 1);

    if hits[0].char_start > 0 {
        segments.push(TextSegment::new(
            &text[..hits[0].byte_start],
            SegmentMetadata::default(),
            0,
            hits[0].char_start,
        ));
    }

    for (i, hit) in hits.iter().enumerate() {
        let (span_end, content_byte_end) = match hits.get(i + 1) {
            Some(next) => (next.char_start, next.byte_start),
            None => (total_chars, text.len()),
        };
        segments.push(TextSegment::new(
            &text[hit.byte_end..content_byte_end],
            hit.attrs.clone().into_metadata(),
            hit.char_start,
            span_end,
        ));
    }

    segments
}

/// Verify the tiling invariant: ordered, contiguous, covering `[0, total)`
fn check_coverage(segments: &[TextSegment], total_chars: usize) -> Result<(), ParseError> {
    let mut expected = 0;
    for segment in segments {
        if segment.start_pos != expected || segment.end_pos < segment.start_pos {
            return Err(ParseError::BrokenCoverage {
                expected,
                found: segment.start_pos,
            });
        }
        expected = segment.end_pos;
    }
    if expected != total_chars {
        return Err(ParseError::BrokenCoverage {
            expected: total_chars,
            found: expected,
        });
    }
    Ok(())
}
