//! Grid editor: one selected cell, one edit buffer, commits back into the sheet.
//!
//! The editor owns the Sheet and presents it as a fixed logical grid: rows
//! default to 100 (growing only if the loaded data is taller), columns come
//! from the header row supplied at construction. Two modes: Normal (no
//! selection) and Edit (exactly one selected cell with a live buffer).

use tracing::debug;

use crate::cell::EditBuffer;
use crate::sheet::{CellValue, Sheet};
use crate::state::{CellPosition, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, Mode, column_headers};

pub struct GridEditor {
    headers: Vec<String>,
    sheet: Sheet,
    cursor: CellPosition,
    mode: Mode,
    input: EditBuffer,
    grid_rows: usize,
    data_changed: Option<Box<dyn FnMut(&Sheet)>>,
}

impl GridEditor {
    /// Headers are supplied once and fix the column count for the editor's
    /// lifetime; the sheet may be narrower or shorter than the grid.
    pub fn new(headers: Vec<String>, sheet: Sheet) -> Self {
        assert!(!headers.is_empty(), "grid needs at least one column");
        let grid_rows = DEFAULT_GRID_ROWS.max(sheet.row_count());
        Self {
            headers,
            sheet,
            cursor: CellPosition::new(0, 0),
            mode: Mode::Normal,
            input: EditBuffer::new(),
            grid_rows,
            data_changed: None,
        }
    }

    /// A blank grid of the default size, for "create new sheet" entered
    /// without the adapter.
    pub fn with_default_grid() -> Self {
        Self::new(column_headers(DEFAULT_GRID_COLS), Sheet::new())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.grid_rows
    }

    pub fn col_count(&self) -> usize {
        self.headers.len()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> CellPosition {
        self.cursor
    }

    /// The active cell, present exactly while an edit is in progress.
    pub fn selection(&self) -> Option<CellPosition> {
        (self.mode == Mode::Edit).then_some(self.cursor)
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn input(&self) -> &EditBuffer {
        &self.input
    }

    /// Mutable buffer access, available only while editing.
    pub fn input_mut(&mut self) -> Option<&mut EditBuffer> {
        (self.mode == Mode::Edit).then_some(&mut self.input)
    }

    /// Register the callback fired with the full sheet on every commit.
    pub fn set_data_changed_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&Sheet) + 'static,
    {
        self.data_changed = Some(Box::new(handler));
    }

    pub fn display_value(&self, row: usize, col: usize) -> String {
        self.sheet.display(row, col)
    }

    /// Select a cell and enter edit mode, seeding the buffer with the cell's
    /// current text. Selecting a different cell while an edit is in progress
    /// commits that edit first; the in-flight value is never dropped.
    /// Returns true if the reentrant commit changed the sheet.
    ///
    /// Callers keep `row`/`col` inside the logical grid.
    pub fn select_cell(&mut self, row: usize, col: usize) -> bool {
        assert!(
            row < self.grid_rows && col < self.headers.len(),
            "cell ({row}, {col}) is outside the logical grid"
        );

        if self.mode == Mode::Edit && self.cursor == CellPosition::new(row, col) {
            // Re-selecting the cell under edit keeps the buffer as typed.
            return false;
        }

        let changed = if self.mode == Mode::Edit { self.commit() } else { false };

        self.cursor = CellPosition::new(row, col);
        // Seed synchronously so typing lands in the buffer without an extra step.
        self.input.set_content(self.sheet.display(row, col));
        self.mode = Mode::Edit;
        debug!(cell = %self.cursor.to_reference(), "selected");
        changed
    }

    /// Replace the whole edit buffer. Ignored outside edit mode.
    pub fn update_input(&mut self, text: &str) {
        if self.mode != Mode::Edit {
            debug!("ignored input update outside edit mode");
            return;
        }
        self.input.set_content(text);
    }

    /// Commit the buffer into the selected cell and return to Normal mode.
    /// Returns true if the sheet changed. No-op when nothing is selected.
    pub fn commit_and_deselect(&mut self) -> bool {
        if self.mode != Mode::Edit {
            return false;
        }
        self.commit()
    }

    /// Commit any in-progress edit, then move the cursor.
    pub fn commit_and_move(&mut self, delta_row: isize, delta_col: isize) -> bool {
        let changed = if self.mode == Mode::Edit { self.commit() } else { false };
        self.move_cursor(delta_row, delta_col);
        changed
    }

    /// Move the cursor with bound clamping. Normal mode only; an in-progress
    /// edit keeps the selection where it is until committed.
    pub fn move_cursor(&mut self, delta_row: isize, delta_col: isize) {
        if self.mode == Mode::Edit {
            return;
        }
        let new_row = (self.cursor.row as isize + delta_row)
            .max(0)
            .min((self.grid_rows - 1) as isize) as usize;
        let new_col = (self.cursor.col as isize + delta_col)
            .max(0)
            .min((self.headers.len() - 1) as isize) as usize;
        self.cursor = CellPosition::new(new_row, new_col);
    }

    fn commit(&mut self) -> bool {
        let pos = self.cursor;
        let text = self.input.take();
        self.mode = Mode::Normal;

        // Writing the unchanged display text back would turn a numeric cell
        // into its text rendering; only write when the user actually edited.
        let changed = text != self.sheet.display(pos.row, pos.col);
        if changed {
            debug!(cell = %pos.to_reference(), "committed edit");
            self.sheet.set_value(pos.row, pos.col, CellValue::text(text));
        }

        if let Some(handler) = self.data_changed.as_mut() {
            handler(&self.sheet);
        }
        changed
    }
}
