// Edit buffer for the cell under active edit.
//
// Holds the in-progress text between selecting a cell and committing it back
// into the sheet. Editing operations are grapheme-aware; the selection range
// tracks byte offsets into the content with an anchor-reversal flag so
// extending a selection across its own anchor behaves like a text field.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

#[derive(Clone, Debug)]
pub struct EditBuffer {
    content: String,
    selected_range: Range<usize>,
    selection_reversed: bool,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditBuffer {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            selected_range: 0..0,
            selection_reversed: false,
        }
    }

    /// Seed the buffer with a cell's text, cursor at the end.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
        let len = self.content.len();
        self.selected_range = len..len;
        self.selection_reversed = false;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Drain the buffer, returning its text. Used on commit.
    pub fn take(&mut self) -> String {
        self.selected_range = 0..0;
        self.selection_reversed = false;
        std::mem::take(&mut self.content)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn cursor_offset(&self) -> usize {
        if self.selection_reversed {
            self.selected_range.start
        } else {
            self.selected_range.end
        }
    }

    pub fn selected_text(&self) -> &str {
        &self.content[self.selected_range.clone()]
    }

    /// Replace the selection (or insert at the cursor) with `text`.
    pub fn insert(&mut self, text: &str) {
        let range = self.selected_range.clone();
        self.content.replace_range(range.clone(), text);
        let cursor = range.start + text.len();
        self.selected_range = cursor..cursor;
        self.selection_reversed = false;
    }

    pub fn backspace(&mut self) {
        if self.selected_range.is_empty() {
            self.select_to(self.previous_boundary(self.cursor_offset()));
        }
        self.insert("");
    }

    pub fn delete(&mut self) {
        if self.selected_range.is_empty() {
            self.select_to(self.next_boundary(self.cursor_offset()));
        }
        self.insert("");
    }

    pub fn delete_to_start(&mut self) {
        if self.selected_range.is_empty() {
            self.select_to(0);
        }
        self.insert("");
    }

    pub fn delete_word_backward(&mut self) {
        if self.selected_range.is_empty() {
            self.select_to(self.previous_word_boundary(self.cursor_offset()));
        }
        self.insert("");
    }

    pub fn left(&mut self) {
        if self.selected_range.is_empty() {
            self.move_to(self.previous_boundary(self.cursor_offset()));
        } else {
            self.move_to(self.selected_range.start);
        }
    }

    pub fn right(&mut self) {
        if self.selected_range.is_empty() {
            self.move_to(self.next_boundary(self.selected_range.end));
        } else {
            self.move_to(self.selected_range.end);
        }
    }

    pub fn select_left(&mut self) {
        self.select_to(self.previous_boundary(self.cursor_offset()));
    }

    pub fn select_right(&mut self) {
        self.select_to(self.next_boundary(self.cursor_offset()));
    }

    pub fn select_all(&mut self) {
        self.move_to(0);
        self.select_to(self.content.len());
    }

    pub fn home(&mut self) {
        self.move_to(0);
    }

    pub fn end(&mut self) {
        self.move_to(self.content.len());
    }

    pub fn word_left(&mut self) {
        self.move_to(self.previous_word_boundary(self.cursor_offset()));
    }

    pub fn word_right(&mut self) {
        self.move_to(self.next_word_boundary(self.cursor_offset()));
    }

    pub fn select_word_left(&mut self) {
        self.select_to(self.previous_word_boundary(self.cursor_offset()));
    }

    pub fn select_word_right(&mut self) {
        self.select_to(self.next_word_boundary(self.cursor_offset()));
    }

    fn move_to(&mut self, offset: usize) {
        self.selected_range = offset..offset;
        self.selection_reversed = false;
    }

    fn select_to(&mut self, offset: usize) {
        if self.selection_reversed {
            self.selected_range.start = offset;
        } else {
            self.selected_range.end = offset;
        }
        if self.selected_range.end < self.selected_range.start {
            self.selection_reversed = !self.selection_reversed;
            self.selected_range = self.selected_range.end..self.selected_range.start;
        }
    }

    fn previous_boundary(&self, offset: usize) -> usize {
        self.content
            .grapheme_indices(true)
            .rev()
            .find_map(|(idx, _)| (idx < offset).then_some(idx))
            .unwrap_or(0)
    }

    fn next_boundary(&self, offset: usize) -> usize {
        self.content
            .grapheme_indices(true)
            .find_map(|(idx, _)| (idx > offset).then_some(idx))
            .unwrap_or(self.content.len())
    }

    fn previous_word_boundary(&self, offset: usize) -> usize {
        let mut prev_offset = offset;
        let mut found_word = false;

        for (idx, grapheme) in self.content.grapheme_indices(true).rev() {
            if idx >= offset {
                continue;
            }
            let is_word_char = grapheme
                .chars()
                .next()
                .map(|c| c.is_alphanumeric() || c == '_')
                .unwrap_or(false);
            if is_word_char {
                found_word = true;
                prev_offset = idx;
            } else if found_word {
                // Hit a non-word char after finding word chars
                break;
            } else {
                prev_offset = idx;
            }
        }

        if found_word { prev_offset } else { 0 }
    }

    fn next_word_boundary(&self, offset: usize) -> usize {
        let mut in_word = false;

        for (idx, grapheme) in self.content.grapheme_indices(true) {
            if idx <= offset {
                continue;
            }
            let is_word_char = grapheme
                .chars()
                .next()
                .map(|c| c.is_alphanumeric() || c == '_')
                .unwrap_or(false);
            if is_word_char {
                in_word = true;
            } else if in_word {
                return idx;
            }
        }

        self.content.len()
    }
}
