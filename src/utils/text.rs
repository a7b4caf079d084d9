//! Character offset helpers
//!
//! Segment positions are character offsets, while `String` splicing works in
//! bytes. These helpers count characters and turn character offsets into
//! byte splice boundaries.

/// Length of a string in characters
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the character at `char_idx`
///
/// An index at or past the end of the string maps to `s.len()`, so the
/// result is always usable as a splice boundary.
pub fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(byte_idx, _)| byte_idx)
}
