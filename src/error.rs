//! Unified error type for reportsheets operations.
//!
//! Every failure the upload flow can surface to a user is one of these
//! variants; nothing in the library panics on bad input or bad files.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    /// File extension is not on the upload allow-list. Rejected before any read.
    #[error("unsupported file type: expected .xlsx or .xls, got {0:?}")]
    InvalidFileType(String),

    /// File exceeds the configured upload limit. Rejected before any read.
    #[error("file is {actual} bytes, over the {limit} byte limit")]
    FileTooLarge { actual: u64, limit: u64 },

    /// Underlying file read or write failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Buffer is not a recognized workbook container, or contains no sheets.
    #[error("parse error: {0}")]
    Parse(String),

    /// Building the workbook container failed. Fatal for the action, never retried.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// The current session was opened read-only.
    #[error("sheet is read-only")]
    ReadOnly,
}

/// Result type for reportsheets operations.
pub type Result<T> = std::result::Result<T, SheetError>;
