//! File-backed and in-memory history stores.

use super::{HistoryDocument, HistoryStore, PersistenceError};
use crate::core::CalculationRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// On-disk encoding of a [`HistoryDocument`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageFormat {
    /// Pretty-printed JSON, readable by hand.
    #[default]
    Json,
    /// Compact bincode.
    Binary,
}

/// Stores history in a single file.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a crash mid-write never leaves a truncated history behind. A missing file
/// loads as an empty history.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    format: StorageFormat,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, format: StorageFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self::new(path, StorageFormat::Json)
    }

    pub fn binary(path: impl Into<PathBuf>) -> Self {
        Self::new(path, StorageFormat::Binary)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl HistoryStore for FileStore {
    fn save(&self, records: &[CalculationRecord]) -> Result<(), PersistenceError> {
        let document = HistoryDocument::new(records);
        let bytes = match self.format {
            StorageFormat::Json => document.to_json()?.into_bytes(),
            StorageFormat::Binary => document.to_binary()?,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, bytes).map_err(|e| io_error(&temp, e))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(io_error(&self.path, e));
        }

        debug!(path = %self.path.display(), records = records.len(), "history saved");
        Ok(())
    }

    fn load(&self) -> Result<Vec<CalculationRecord>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved history, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(io_error(&self.path, e)),
        };

        let document = match self.format {
            StorageFormat::Json => {
                let text = String::from_utf8(bytes)
                    .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;
                HistoryDocument::from_json(&text)?
            }
            StorageFormat::Binary => HistoryDocument::from_binary(&bytes)?,
        };

        debug!(path = %self.path.display(), records = document.records.len(), "history loaded");
        Ok(document.into_records())
    }
}

/// Keeps the serialized history in memory.
///
/// Goes through the same JSON encoding as [`FileStore`], so it exercises the
/// full round trip without touching disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw JSON of the last save, if any.
    pub fn contents(&self) -> Option<String> {
        self.saved
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl HistoryStore for MemoryStore {
    fn save(&self, records: &[CalculationRecord]) -> Result<(), PersistenceError> {
        let json = HistoryDocument::new(records).to_json()?;
        *self
            .saved
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<Vec<CalculationRecord>, PersistenceError> {
        match self.contents() {
            Some(json) => Ok(HistoryDocument::from_json(&json)?.into_records()),
            None => Ok(Vec::new()),
        }
    }
}
