//! Persisted history documents and the stores that hold them.
//!
//! A saved history is an ordered list of records, each carrying
//! `operation_name`, `operand_a`, `operand_b`, `result` and an ISO-8601
//! `timestamp`. Loading yields the records in the same order. Undo/redo
//! stacks are never persisted.

pub mod error;
mod store;

pub use error::PersistenceError;
pub use store::{FileStore, MemoryStore, StorageFormat};

use crate::core::CalculationRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version identifier for the history document format
pub const HISTORY_FORMAT_VERSION: u32 = 1;

/// Durable home for a record sequence.
pub trait HistoryStore: Send + Sync {
    /// Replace the stored history with `records`.
    fn save(&self, records: &[CalculationRecord]) -> Result<(), PersistenceError>;

    /// Read the stored history, oldest record first.
    fn load(&self) -> Result<Vec<CalculationRecord>, PersistenceError>;
}

/// Serializable history with format metadata.
///
/// # Example
///
/// ```rust
/// use reckon::core::CalculationRecord;
/// use reckon::persistence::HistoryDocument;
/// use chrono::Utc;
///
/// let records = vec![CalculationRecord::new("add", 10.0, 5.0, 15.0, Utc::now())];
/// let json = HistoryDocument::new(&records).to_json().unwrap();
///
/// let restored = HistoryDocument::from_json(&json).unwrap();
/// assert_eq!(restored.records, records);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryDocument {
    /// Document format version
    pub version: u32,

    /// Unique identifier of this save
    pub id: Uuid,

    /// When the document was written
    pub saved_at: DateTime<Utc>,

    /// Records in chronological order
    pub records: Vec<CalculationRecord>,
}

impl HistoryDocument {
    pub fn new(records: &[CalculationRecord]) -> Self {
        Self {
            version: HISTORY_FORMAT_VERSION,
            id: Uuid::new_v4(),
            saved_at: Utc::now(),
            records: records.to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let document: Self = serde_json::from_str(json)
            .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;
        document.check_version()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, PersistenceError> {
        bincode::serialize(self).map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, PersistenceError> {
        let document: Self = bincode::deserialize(bytes)
            .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;
        document.check_version()
    }

    pub fn into_records(self) -> Vec<CalculationRecord> {
        self.records
    }

    fn check_version(self) -> Result<Self, PersistenceError> {
        if self.version != HISTORY_FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.version,
                supported: HISTORY_FORMAT_VERSION,
            });
        }
        Ok(self)
    }
}
