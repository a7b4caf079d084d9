//! Line-oriented typing constraints
//!
//! The editor renders fixed-width lines capped at 80 characters. Typing in
//! the middle of a line overwrites instead of inserting, so the layout
//! never shifts; typing at the end appends while the cap allows. These are
//! pure decisions for a frontend to apply to its own buffer.

/// Hard cap on rendered line length
pub const MAX_LINE_LENGTH: usize = 80;

/// What should happen to a character typed at a column of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedCharOutcome {
    Insert,
    Overwrite,
    Blocked,
}

/// Decide the outcome for a character typed on a line of `line_len`
/// characters with the caret at `column`
pub fn typed_char_outcome(line_len: usize, column: usize) -> TypedCharOutcome {
    if line_len >= MAX_LINE_LENGTH && column >= MAX_LINE_LENGTH {
        TypedCharOutcome::Blocked
    } else if column < line_len {
        TypedCharOutcome::Overwrite
    } else {
        // Appending; a full line was already caught above
        TypedCharOutcome::Insert
    }
}

/// Column guide stops for the grid overlay: 5, 10, .. 80
pub fn grid_column_stops() -> Vec<usize> {
    (1..=MAX_LINE_LENGTH / 5).map(|i| i * 5).collect()
}
