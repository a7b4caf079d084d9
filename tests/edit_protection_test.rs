// Locked segment protection through a real parsed document: position
// checks, insertion boundaries, range deletion, denied updates.

use editor_core::document::DocumentManager;

// free [0,4) | locked "keep" (marker + LOCK) | free "tail" (marker + tail)
const FENCED: &str = concat!(
    "free",
    r#"<!-- SEGMENT: id="keep", locked="true" -->LOCK"#,
    r#"<!-- SEGMENT: id="tail" -->tail"#,
);

fn fenced() -> DocumentManager {
    let mut manager = DocumentManager::new();
    manager.set_content(FENCED);
    manager
}

#[test]
fn test_locked_span_reported_by_model() {
    let manager = fenced();
    let keep = manager.segment_by_id("keep").unwrap();

    assert_eq!(keep.start_pos, 4);
    assert_eq!(keep.content, "LOCK");
    assert!(keep.metadata.is_locked());
}

#[test]
fn test_position_lock_exact_boundaries() {
    let manager = fenced();
    let (start, end) = {
        let keep = manager.segment_by_id("keep").unwrap();
        (keep.start_pos, keep.end_pos)
    };

    assert!(!manager.is_position_locked(start - 1));
    assert!(manager.is_position_locked(start));
    assert!(manager.is_position_locked(end - 1));
    assert!(!manager.is_position_locked(end));

    assert!(manager.can_edit_at(start - 1));
    assert!(!manager.can_edit_at(start));
    assert!(!manager.can_edit_at(end - 1));
    assert!(manager.can_edit_at(end));
}

#[test]
fn test_out_of_range_positions_are_editable() {
    let manager = fenced();
    let len = manager.document_len();

    assert!(!manager.is_position_locked(len + 10));
    assert!(manager.can_edit_at(len + 10));
}

#[test]
fn test_insertion_allowed_at_locked_boundaries_only() {
    let manager = fenced();
    let (start, end) = {
        let keep = manager.segment_by_id("keep").unwrap();
        (keep.start_pos, keep.end_pos)
    };

    assert!(manager.can_insert_at(start));
    assert!(manager.can_insert_at(end));
    for position in (start + 1)..end {
        assert!(
            !manager.can_insert_at(position),
            "insertion should be blocked at {}",
            position
        );
    }
    assert!(manager.can_insert_at(0));
    assert!(manager.can_insert_at(manager.document_len()));
}

#[test]
fn test_deletion_blocked_when_any_intersecting_segment_locked() {
    let manager = fenced();
    let (start, end) = {
        let keep = manager.segment_by_id("keep").unwrap();
        (keep.start_pos, keep.end_pos)
    };

    // Entirely before or after the locked span
    assert!(manager.can_delete_range(0, start));
    assert!(manager.can_delete_range(end, manager.document_len()));

    // Exactly the locked span, inside it, and straddling either boundary
    assert!(!manager.can_delete_range(start, end));
    assert!(!manager.can_delete_range(start + 1, end - 1));
    assert!(!manager.can_delete_range(start - 1, start + 1));
    assert!(!manager.can_delete_range(end - 1, end + 1));
    assert!(!manager.can_delete_range(0, manager.document_len()));
}

#[test]
fn test_empty_range_deletion_is_permitted_everywhere() {
    let manager = fenced();
    let keep = manager.segment_by_id("keep").unwrap();
    let inside = keep.start_pos + 2;

    assert!(manager.can_delete_range(inside, inside));
}

#[test]
fn test_denied_update_leaves_buffer_byte_identical() {
    let mut manager = fenced();
    manager.mark_saved();
    let before = manager.content().as_bytes().to_vec();

    assert!(!manager.update_segment_content("keep", "REPLACED"));
    assert_eq!(manager.content().as_bytes(), before.as_slice());
    assert!(!manager.is_modified());
}

#[test]
fn test_unlocked_neighbours_stay_editable() {
    let mut manager = fenced();

    assert!(manager.update_segment_content("tail", "swapped"));
    assert_eq!(manager.segment_by_id("tail").unwrap().content, "swapped");
    // The locked segment is untouched
    assert_eq!(manager.segment_by_id("keep").unwrap().content, "LOCK");
}

#[test]
fn test_dynamic_segment_is_protected_like_locked() {
    let text = concat!(
        r#"<!-- SEGMENT: id="a" -->10"#,
        r#"<!-- SEGMENT: id="b" -->3"#,
        r#"<!-- SEGMENT: id="calc", locked="false", dynamic="difference:a,b" -->old"#,
    );
    let mut manager = DocumentManager::new();
    manager.set_content(text);
    let (start, end) = {
        let calc = manager.segment_by_id("calc").unwrap();
        (calc.start_pos, calc.end_pos)
    };

    assert!(manager.is_position_locked(start));
    assert!(!manager.can_insert_at(start + 1));
    assert!(!manager.can_delete_range(start, end));
    assert!(!manager.update_segment_content("calc", "new"));
}

#[test]
fn test_adjacent_locked_segments_keep_shared_boundary_insertable() {
    let text = concat!(
        r#"<!-- SEGMENT: id="l1", locked="true" -->aa"#,
        r#"<!-- SEGMENT: id="l2", locked="true" -->bb"#,
    );
    let mut manager = DocumentManager::new();
    manager.set_content(text);
    let boundary = manager.segment_by_id("l2").unwrap().start_pos;

    assert!(manager.can_insert_at(boundary));
    assert!(!manager.can_insert_at(boundary - 1));
    assert!(!manager.can_insert_at(boundary + 1));
}
