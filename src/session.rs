use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Bookkeeping for the sheet currently being edited: where it came from,
/// whether it has uncommitted-to-store changes, and whether writes are
/// allowed. A fresh session means a blank sheet with no source file.
#[derive(Clone, Debug)]
pub struct SheetSession {
    source: Option<PathBuf>,
    dirty: bool,
    read_only: bool,
    started_at: DateTime<Utc>,
}

impl Default for SheetSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetSession {
    pub fn new() -> Self {
        Self {
            source: None,
            dirty: false,
            read_only: false,
            started_at: Utc::now(),
        }
    }

    pub fn for_file(path: PathBuf) -> Self {
        Self {
            source: Some(path),
            ..Self::new()
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, path: PathBuf) {
        self.source = Some(path);
    }

    pub fn file_name(&self) -> String {
        self.source
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "[No Name]".to_string())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        if !self.read_only {
            self.dirty = true;
        }
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
