//! Grid editor state machine tests: selection, commit, reentrant commit.

use std::cell::RefCell;
use std::rc::Rc;

use reportsheets::editor::GridEditor;
use reportsheets::sheet::{CellValue, Sheet};
use reportsheets::state::{CellPosition, Mode, column_headers};

fn text(s: &str) -> CellValue {
    CellValue::text(s)
}

fn sample_sheet() -> Sheet {
    Sheet::from_rows(vec![
        vec![text("a"), text("b"), text("c")],
        vec![
            CellValue::Number(1.0),
            CellValue::Number(2.0),
            CellValue::Number(3.0),
        ],
    ])
}

fn sample_editor() -> GridEditor {
    GridEditor::new(column_headers(5), sample_sheet())
}

#[test]
fn noop_commit_leaves_sheet_unchanged() {
    let mut editor = sample_editor();
    let before = editor.sheet().clone();

    editor.select_cell(0, 0);
    editor.commit_and_deselect();

    assert_eq!(editor.sheet(), &before);
    assert_eq!(editor.selection(), None);
    assert_eq!(editor.mode(), Mode::Normal);
}

#[test]
fn noop_commit_preserves_numeric_cells() {
    let mut editor = sample_editor();

    editor.select_cell(1, 0);
    assert_eq!(editor.input().content(), "1");
    editor.commit_and_deselect();

    assert_eq!(editor.sheet().value(1, 0), Some(&CellValue::Number(1.0)));
}

#[test]
fn commit_stores_value_and_deselects() {
    let mut editor = sample_editor();

    editor.select_cell(1, 1);
    editor.update_input("X");
    editor.commit_and_deselect();

    assert_eq!(editor.display_value(1, 1), "X");
    assert_eq!(editor.selection(), None);
}

#[test]
fn empty_buffer_commit_clears_the_cell() {
    let mut editor = sample_editor();

    editor.select_cell(0, 2);
    editor.update_input("");
    editor.commit_and_deselect();

    assert_eq!(editor.display_value(0, 2), "");
    assert_eq!(editor.sheet().value(0, 2), Some(&CellValue::Empty));
}

#[test]
fn selecting_seeds_buffer_with_cell_text() {
    let mut editor = sample_editor();

    editor.select_cell(0, 1);
    assert_eq!(editor.input().content(), "b");
    assert_eq!(editor.selection(), Some(CellPosition::new(0, 1)));
}

#[test]
fn selecting_empty_cell_seeds_empty_buffer() {
    let mut editor = sample_editor();

    editor.select_cell(4, 4);
    assert_eq!(editor.input().content(), "");
}

#[test]
fn reentrant_select_commits_previous_edit() {
    let mut editor = sample_editor();

    editor.select_cell(0, 0);
    editor.update_input("X");
    // Select another cell without an explicit commit: the edit must land.
    editor.select_cell(0, 1);

    assert_eq!(editor.display_value(0, 0), "X");
    assert_eq!(editor.selection(), Some(CellPosition::new(0, 1)));
    assert_eq!(editor.input().content(), "b");
}

#[test]
fn reselecting_same_cell_keeps_typed_buffer() {
    let mut editor = sample_editor();

    editor.select_cell(0, 0);
    editor.update_input("typed");
    editor.select_cell(0, 0);

    assert_eq!(editor.input().content(), "typed");
}

#[test]
fn data_changed_fires_on_every_commit() {
    let mut editor = sample_editor();
    let seen: Rc<RefCell<Vec<Sheet>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    editor.set_data_changed_handler(move |sheet| sink.borrow_mut().push(sheet.clone()));

    editor.select_cell(0, 0);
    editor.commit_and_deselect(); // no-op edit still notifies

    editor.select_cell(1, 2);
    editor.update_input("9");
    editor.commit_and_deselect();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], sample_sheet());
    assert_eq!(seen[1].display(1, 2), "9");
}

#[test]
fn writes_extend_rows_beyond_stored_data() {
    let mut editor = GridEditor::with_default_grid();

    editor.select_cell(50, 3);
    editor.update_input("deep");
    editor.commit_and_deselect();

    assert_eq!(editor.display_value(50, 3), "deep");
    assert_eq!(editor.row_count(), 100);
}

#[test]
fn grid_grows_to_fit_tall_sheets() {
    let rows = (0..150).map(|_| vec![text("x")]).collect();
    let editor = GridEditor::new(column_headers(3), Sheet::from_rows(rows));

    assert_eq!(editor.row_count(), 150);
    assert_eq!(editor.col_count(), 3);
}

#[test]
fn cursor_clamps_to_grid_bounds() {
    let mut editor = sample_editor();

    editor.move_cursor(-5, -5);
    assert_eq!(editor.cursor(), CellPosition::new(0, 0));

    editor.move_cursor(1000, 1000);
    assert_eq!(editor.cursor(), CellPosition::new(99, 4));
}

#[test]
fn cursor_is_pinned_while_editing() {
    let mut editor = sample_editor();

    editor.select_cell(1, 1);
    editor.move_cursor(1, 0);

    assert_eq!(editor.selection(), Some(CellPosition::new(1, 1)));
}

#[test]
fn commit_and_move_commits_first() {
    let mut editor = sample_editor();

    editor.select_cell(0, 0);
    editor.update_input("moved");
    editor.commit_and_move(1, 0);

    assert_eq!(editor.display_value(0, 0), "moved");
    assert_eq!(editor.cursor(), CellPosition::new(1, 0));
    assert_eq!(editor.selection(), None);
}

#[test]
fn update_input_is_ignored_outside_edit_mode() {
    let mut editor = sample_editor();
    let before = editor.sheet().clone();

    editor.update_input("ghost");
    editor.commit_and_deselect();

    assert_eq!(editor.sheet(), &before);
    assert_eq!(editor.input().content(), "");
}
