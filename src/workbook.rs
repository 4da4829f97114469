//! Excel workbook import/export.
//!
//! Converts between a binary workbook container (.xlsx/.xls) and the
//! row-major `Sheet`, both directions in memory. Only the first sheet of a
//! container is read; serialization always produces a single-sheet .xlsx.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use rust_xlsxwriter::Workbook;
use tracing::{debug, warn};

use crate::error::{Result, SheetError};
use crate::sheet::{CellValue, Sheet};

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Parse the first sheet of a workbook container into a row-major `Sheet`.
///
/// The container format is auto-detected from the buffer. Fails with
/// `SheetError::Parse` when the buffer is not a recognized workbook or the
/// workbook has no sheets. Leading empty rows and columns implied by the
/// sheet's start offset are preserved so cell positions survive a round trip.
pub fn parse(buffer: &[u8]) -> Result<Sheet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(buffer))
        .map_err(|e| SheetError::Parse(e.to_string()))?;

    let names = workbook.sheet_names().to_vec();
    let first = names
        .first()
        .cloned()
        .ok_or_else(|| SheetError::Parse("workbook contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| SheetError::Parse(e.to_string()))?;

    let (offset_row, offset_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<CellValue>> = Vec::with_capacity(offset_row + range.height());
    rows.resize_with(offset_row, Vec::new);
    for row in range.rows() {
        let mut cells = Vec::with_capacity(offset_col + row.len());
        cells.resize(offset_col, CellValue::Empty);
        cells.extend(row.iter().map(convert));
        rows.push(cells);
    }

    debug!(sheet = %first, rows = rows.len(), "parsed workbook");
    Ok(Sheet::from_rows(rows))
}

fn convert(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.clone()),
        Data::Error(e) => {
            warn!(error = ?e, "ignoring error cell");
            CellValue::Empty
        }
    }
}

/// Build a single-sheet .xlsx container from a `Sheet` and return the binary
/// buffer, ready for download or handoff to the store.
///
/// Trailing empty rows and columns are trimmed at the used bounds; the
/// underlying format does not represent them, which is the one accepted lossy
/// edge of the parse/serialize round trip.
pub fn serialize(sheet: &Sheet, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| SheetError::Serialize(e.to_string()))?;

    if let Some((max_row, max_col)) = sheet.used_bounds() {
        for row in 0..=max_row {
            for col in 0..=max_col {
                let Some(value) = sheet.value(row, col) else { continue };
                match value {
                    CellValue::Empty => {}
                    CellValue::Text(text) => {
                        worksheet
                            .write_string(row as u32, col as u16, text.as_str())
                            .map_err(|e| SheetError::Serialize(e.to_string()))?;
                    }
                    CellValue::Number(n) => {
                        worksheet
                            .write_number(row as u32, col as u16, *n)
                            .map_err(|e| SheetError::Serialize(e.to_string()))?;
                    }
                    CellValue::Bool(b) => {
                        worksheet
                            .write_boolean(row as u32, col as u16, *b)
                            .map_err(|e| SheetError::Serialize(e.to_string()))?;
                    }
                }
            }
        }
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| SheetError::Serialize(e.to_string()))?;
    debug!(bytes = buffer.len(), "serialized workbook");
    Ok(buffer)
}

/// Minimal placeholder sheet for the "create new sheet" flow: one empty row.
pub fn create_blank() -> Sheet {
    Sheet::from_rows(vec![Vec::new()])
}
