//! Edit buffer tests: cursor motion, selection, grapheme-aware deletion.

use reportsheets::cell::EditBuffer;

#[test]
fn set_content_places_cursor_at_end() {
    let mut buffer = EditBuffer::new();
    buffer.set_content("abc");

    assert_eq!(buffer.content(), "abc");
    assert_eq!(buffer.cursor_offset(), 3);
}

#[test]
fn insert_appends_at_cursor() {
    let mut buffer = EditBuffer::new();
    buffer.set_content("ab");
    buffer.insert("c");

    assert_eq!(buffer.content(), "abc");
}

#[test]
fn insert_replaces_selection() {
    let mut buffer = EditBuffer::new();
    buffer.set_content("hello");
    buffer.select_all();
    buffer.insert("x");

    assert_eq!(buffer.content(), "x");
    assert_eq!(buffer.cursor_offset(), 1);
}

#[test]
fn backspace_removes_whole_grapheme_cluster() {
    let mut buffer = EditBuffer::new();
    // 'e' followed by a combining acute accent is one grapheme
    buffer.set_content("ae\u{301}");
    buffer.backspace();

    assert_eq!(buffer.content(), "a");
}

#[test]
fn backspace_on_empty_buffer_is_noop() {
    let mut buffer = EditBuffer::new();
    buffer.backspace();

    assert_eq!(buffer.content(), "");
}

#[test]
fn delete_removes_forward() {
    let mut buffer = EditBuffer::new();
    buffer.set_content("abc");
    buffer.home();
    buffer.delete();

    assert_eq!(buffer.content(), "bc");
}

#[test]
fn left_and_right_step_graphemes() {
    let mut buffer = EditBuffer::new();
    buffer.set_content("ab");
    buffer.left();
    assert_eq!(buffer.cursor_offset(), 1);
    buffer.right();
    assert_eq!(buffer.cursor_offset(), 2);
}

#[test]
fn select_left_then_type_overwrites() {
    let mut buffer = EditBuffer::new();
    buffer.set_content("abc");
    buffer.select_left();

    assert_eq!(buffer.selected_text(), "c");
    buffer.insert("Z");
    assert_eq!(buffer.content(), "abZ");
}

#[test]
fn selection_extends_across_its_anchor() {
    let mut buffer = EditBuffer::new();
    buffer.set_content("abc");
    buffer.left(); // cursor between b and c
    buffer.select_left();
    assert_eq!(buffer.selected_text(), "b");
    buffer.select_right();
    assert_eq!(buffer.selected_text(), "");
    buffer.select_right();
    assert_eq!(buffer.selected_text(), "c");
}

#[test]
fn word_right_stops_after_a_word() {
    let mut buffer = EditBuffer::new();
    buffer.set_content("hello world");
    buffer.home();
    buffer.word_right();

    assert_eq!(buffer.cursor_offset(), 5);
}

#[test]
fn delete_word_backward_eats_the_last_word() {
    let mut buffer = EditBuffer::new();
    buffer.set_content("hello world");
    buffer.delete_word_backward();

    assert_eq!(buffer.content(), "hello ");
}

#[test]
fn delete_to_start_clears_before_cursor() {
    let mut buffer = EditBuffer::new();
    buffer.set_content("hello");
    buffer.left();
    buffer.delete_to_start();

    assert_eq!(buffer.content(), "o");
}

#[test]
fn take_drains_the_buffer() {
    let mut buffer = EditBuffer::new();
    buffer.set_content("kept");

    assert_eq!(buffer.take(), "kept");
    assert!(buffer.is_empty());
    assert_eq!(buffer.cursor_offset(), 0);
}
