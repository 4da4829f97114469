//! Upload flow: mediates between file input, the workbook adapter, the grid
//! editor, and the persistence store.
//!
//! The flow is in one of two stages, mirroring the page it drives: `Choose`
//! (pick a file or start blank) and `Edit` (an editor is live). Every error
//! leaves the previously displayed sheet untouched; the host renders the
//! error value as a user-visible message.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::editor::GridEditor;
use crate::error::{Result, SheetError};
use crate::session::SheetSession;
use crate::sheet::Sheet;
use crate::state::{DEFAULT_GRID_COLS, Mode, column_headers};
use crate::store::{LogStore, SheetRecord, SheetStore};
use crate::workbook;

/// Extensions accepted by the upload flow.
const ALLOWED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];
/// "Up to 10MB", enforced.
const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub allowed_extensions: Vec<String>,
    /// Maximum upload size in bytes; 0 disables the check.
    pub max_file_size: u64,
    /// Sheet name written into serialized workbooks.
    pub sheet_name: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: ALLOWED_EXTENSIONS.map(String::from).to_vec(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            sheet_name: workbook::DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl UploadConfig {
    /// Load from a JSON file, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn allows_extension(&self, extension: &str) -> bool {
        !extension.is_empty()
            && self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Nothing open: waiting for an upload or a create-blank.
    Choose,
    /// An editor is live.
    Edit,
}

pub struct UploadFlow {
    config: UploadConfig,
    editor: Option<GridEditor>,
    session: SheetSession,
    store: Box<dyn SheetStore>,
}

impl UploadFlow {
    pub fn new(config: UploadConfig) -> Self {
        Self::with_store(config, Box::new(LogStore))
    }

    pub fn with_store(config: UploadConfig, store: Box<dyn SheetStore>) -> Self {
        Self {
            config,
            editor: None,
            session: SheetSession::new(),
            store,
        }
    }

    pub fn stage(&self) -> Stage {
        if self.editor.is_some() { Stage::Edit } else { Stage::Choose }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    pub fn editor(&self) -> Option<&GridEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut GridEditor> {
        self.editor.as_mut()
    }

    pub fn session(&self) -> &SheetSession {
        &self.session
    }

    /// Validate, read, and parse an uploaded workbook, then swap it in as the
    /// displayed sheet. On any error the current sheet stays as it was.
    pub async fn open_file(&mut self, path: &Path) -> Result<()> {
        self.load(path, false).await
    }

    /// Like `open_file`, but the session refuses saves until forced.
    pub async fn open_file_read_only(&mut self, path: &Path) -> Result<()> {
        self.load(path, true).await
    }

    async fn load(&mut self, path: &Path, read_only: bool) -> Result<()> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if !self.config.allows_extension(extension) {
            warn!(path = %path.display(), "rejected upload: unsupported extension");
            return Err(SheetError::InvalidFileType(extension.to_string()));
        }

        if self.config.max_file_size > 0 {
            let actual = tokio::fs::metadata(path).await?.len();
            if actual > self.config.max_file_size {
                warn!(path = %path.display(), actual, "rejected upload: too large");
                return Err(SheetError::FileTooLarge {
                    actual,
                    limit: self.config.max_file_size,
                });
            }
        }

        let bytes = tokio::fs::read(path).await?;
        let sheet = workbook::parse(&bytes)?;

        // Only now is the displayed sheet replaced.
        self.install(sheet, SheetSession::for_file(path.to_path_buf()));
        self.session.set_read_only(read_only);
        info!(path = %path.display(), "opened workbook");
        Ok(())
    }

    /// Skip file handling entirely and start editing the adapter's blank sheet.
    pub fn create_blank(&mut self) {
        self.install(workbook::create_blank(), SheetSession::new());
        info!("created blank sheet");
    }

    fn install(&mut self, sheet: Sheet, session: SheetSession) {
        let cols = sheet.col_count().max(DEFAULT_GRID_COLS);
        self.editor = Some(GridEditor::new(column_headers(cols), sheet));
        self.session = session;
    }

    /// Select a cell for editing. Returns false when no sheet is open.
    /// Callers keep the position inside the editor's grid.
    pub fn select_cell(&mut self, row: usize, col: usize) -> bool {
        let Some(editor) = self.editor.as_mut() else { return false };
        if editor.select_cell(row, col) {
            self.session.mark_dirty();
        }
        true
    }

    /// Replace the edit buffer. Returns false when no edit is in progress.
    pub fn update_input(&mut self, text: &str) -> bool {
        match self.editor.as_mut() {
            Some(editor) if editor.mode() == Mode::Edit => {
                editor.update_input(text);
                true
            }
            _ => false,
        }
    }

    /// Commit the in-progress edit. Returns false when there was none.
    pub fn commit(&mut self) -> bool {
        let Some(editor) = self.editor.as_mut() else { return false };
        if editor.mode() != Mode::Edit {
            return false;
        }
        if editor.commit_and_deselect() {
            self.session.mark_dirty();
        }
        true
    }

    /// Serialize the sheet and hand it to the store. Refused for read-only
    /// sessions; never retried.
    pub fn save(&mut self) -> Result<()> {
        self.stage_for_upload(false)
    }

    /// Save, ignoring the session's read-only flag.
    pub fn save_forced(&mut self) -> Result<()> {
        self.stage_for_upload(true)
    }

    fn stage_for_upload(&mut self, force: bool) -> Result<()> {
        let Some(editor) = self.editor.as_ref() else {
            debug!("save ignored: no sheet open");
            return Ok(());
        };
        if self.session.is_read_only() && !force {
            return Err(SheetError::ReadOnly);
        }

        let bytes = workbook::serialize(editor.sheet(), &self.config.sheet_name)?;
        let record = SheetRecord {
            file_name: self.session.file_name(),
            sheet_name: self.config.sheet_name.clone(),
            uploaded_at: Utc::now(),
            workbook: bytes,
        };
        self.store.persist(&record)?;
        self.session.mark_clean();
        Ok(())
    }

    /// Serialize the sheet and write it to a local file (save-as/download).
    pub async fn export(&mut self, path: &Path) -> Result<()> {
        let Some(editor) = self.editor.as_ref() else {
            debug!("export ignored: no sheet open");
            return Ok(());
        };
        let bytes = workbook::serialize(editor.sheet(), &self.config.sheet_name)?;
        tokio::fs::write(path, &bytes).await?;
        self.session.mark_clean();
        self.session.set_source(PathBuf::from(path));
        info!(path = %path.display(), bytes = bytes.len(), "exported workbook");
        Ok(())
    }

    /// Discard the current sheet and return to the chooser. No confirmation;
    /// discarding unsaved edits here is the documented behavior.
    pub fn reset(&mut self) {
        self.editor = None;
        self.session = SheetSession::new();
        info!("reset to upload chooser");
    }
}
