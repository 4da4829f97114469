//! Persistence collaborator for saved sheets.
//!
//! The real backend is out of scope; the flow hands a `SheetRecord` to
//! whatever `SheetStore` it was built with. The default store only logs the
//! handoff. Success and failure are reported to the caller, never retried.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;

/// Payload handed to the store on save: the serialized workbook plus the
/// metadata the backend would index it by.
#[derive(Clone, Debug, Serialize)]
pub struct SheetRecord {
    pub file_name: String,
    pub sheet_name: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip)]
    pub workbook: Vec<u8>,
}

pub trait SheetStore {
    fn persist(&mut self, record: &SheetRecord) -> Result<()>;
}

/// Stub store: logs the handoff and drops the payload.
#[derive(Debug, Default)]
pub struct LogStore;

impl SheetStore for LogStore {
    fn persist(&mut self, record: &SheetRecord) -> Result<()> {
        info!(
            file = %record.file_name,
            sheet = %record.sheet_name,
            bytes = record.workbook.len(),
            "sheet ready for upload"
        );
        debug!(
            metadata = %serde_json::to_string(record).unwrap_or_default(),
            "upload record"
        );
        Ok(())
    }
}

/// Captures records in memory, sharing them with clones of itself. Used by
/// tests and dry runs to observe what would have been uploaded.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Rc<RefCell<Vec<SheetRecord>>>,
}

impl MemoryStore {
    pub fn records(&self) -> Vec<SheetRecord> {
        self.records.borrow().clone()
    }
}

impl SheetStore for MemoryStore {
    fn persist(&mut self, record: &SheetRecord) -> Result<()> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}
