//! Observer error types.

use crate::persistence::PersistenceError;
use thiserror::Error;

/// Errors an observer may report while handling an event.
///
/// The notification hub logs and discards these; they never reach the
/// caller that mutated the history.
#[derive(Debug, Error)]
pub enum ObserverError {
    #[error("Persisting history failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("{0}")]
    Failed(String),
}
