//! Persistence error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while saving or loading history
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Document version is not supported by this version
    #[error("Unsupported history format version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Reading or writing the backing file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
