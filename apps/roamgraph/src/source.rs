//! # Note Sources
//!
//! Backend selection and the JSON rows source.
//!
//! - `sqlite`: an org-roam database, read through `roamgraph_core::RoamDb`
//! - `json`: a file holding a serialized `NoteRows`

use clap::ValueEnum;
use roamgraph_core::{NoteRows, NoteSource, RoamDb, RoamError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum size of a JSON rows file (100 MB).
const MAX_ROWS_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Storage backend holding the notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// org-roam SQLite database.
    #[default]
    Sqlite,
    /// JSON file with five parallel row columns.
    Json,
}

/// Note rows stored as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonRows {
    path: PathBuf,
}

impl JsonRows {
    /// Create a source for the file at `path`. Nothing is read yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NoteSource for JsonRows {
    fn fetch_rows(&self) -> Result<NoteRows, RoamError> {
        let metadata = std::fs::metadata(&self.path).map_err(|e| {
            RoamError::Ingestion(format!("cannot read '{}': {}", self.path.display(), e))
        })?;
        if metadata.len() > MAX_ROWS_FILE_SIZE {
            return Err(RoamError::Ingestion(format!(
                "rows file is {} bytes, maximum is {}",
                metadata.len(),
                MAX_ROWS_FILE_SIZE
            )));
        }

        let data = std::fs::read(&self.path).map_err(|e| {
            RoamError::Ingestion(format!("cannot read '{}': {}", self.path.display(), e))
        })?;
        serde_json::from_slice(&data).map_err(|e| {
            RoamError::Ingestion(format!("malformed rows file '{}': {}", self.path.display(), e))
        })
    }
}

/// Open the note source for `backend` at `path`.
#[must_use]
pub fn open_source(backend: Backend, path: &Path) -> Box<dyn NoteSource> {
    match backend {
        Backend::Sqlite => Box::new(RoamDb::new(path)),
        Backend::Json => Box::new(JsonRows::new(path)),
    }
}
