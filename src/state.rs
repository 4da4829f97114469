/// Row count of the logical grid shown for sheets smaller than it.
pub const DEFAULT_GRID_ROWS: usize = 100;
/// Column count used when no file defines a wider sheet.
pub const DEFAULT_GRID_COLS: usize = 26;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Convert to Excel-style cell reference (A1, B5, etc.)
    pub fn to_reference(&self) -> String {
        format!("{}{}", column_label(self.col), self.row + 1)
    }

    /// Parse an Excel-style reference back into a position. Returns None for
    /// anything that is not letters followed by a 1-based row number.
    pub fn parse_reference(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        let digits_at = reference.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = reference.split_at(digits_at);
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let col = letters
            .chars()
            .fold(0usize, |acc, c| acc * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1));
        let row: usize = digits.parse().ok()?;
        if row == 0 {
            return None;
        }
        Some(Self::new(row - 1, col - 1))
    }
}

/// Spreadsheet-style column label (A, B, ..., Z, AA, AB, ...).
pub fn column_label(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Column headers for a grid of `count` columns, supplied to the editor once
/// at construction.
pub fn column_headers(count: usize) -> Vec<String> {
    (0..count).map(column_label).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Edit,
}
