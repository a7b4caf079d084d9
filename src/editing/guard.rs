//! Edit permission checks over the segment model
//!
//! Pure queries: nothing here mutates the document. Locks come from segment
//! metadata (`locked="true"` or a dynamic declaration). Positions are
//! character offsets.

use crate::models::SegmentModel;

/// Whether the segment containing `position` is effectively locked
///
/// Out-of-range positions are not locked (there is nothing there).
pub fn is_position_locked(model: &SegmentModel, position: usize) -> bool {
    model
        .segment_at(position)
        .map(|segment| segment.metadata.is_locked())
        .unwrap_or(false)
}

/// Raw per-position edit check: true unless the position's segment is locked
pub fn can_edit_at(model: &SegmentModel, position: usize) -> bool {
    !is_position_locked(model, position)
}

/// Whether an insertion at `position` is permitted
///
/// Insertion is blocked only strictly inside a locked segment. Positions
/// exactly on a locked segment's boundaries stay legal, including the
/// boundary between two adjacent locked segments: new text lands next to
/// the protected span, never within it.
pub fn can_insert_at(model: &SegmentModel, position: usize) -> bool {
    !model.segments().iter().any(|segment| {
        segment.metadata.is_locked()
            && segment.start_pos < position
            && position < segment.end_pos
    })
}

/// Whether deleting the half-open range `[start, end)` is permitted
///
/// Every segment the range intersects must be unlocked; a deletion that so
/// much as grazes a locked segment is denied. Empty and inverted ranges
/// delete nothing and are always permitted.
pub fn can_delete_range(model: &SegmentModel, start: usize, end: usize) -> bool {
    if start >= end {
        return true;
    }
    !model.segments().iter().any(|segment| {
        segment.metadata.is_locked() && segment.start_pos < end && start < segment.end_pos
    })
}
