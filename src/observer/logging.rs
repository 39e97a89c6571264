//! Observer that writes each history event to the `tracing` pipeline.

use super::{HistoryEvent, Observer, ObserverError};
use crate::core::CalculationRecord;
use tracing::info;

/// Emits one `info` event per history event.
///
/// Where the output ends up is decided by whichever `tracing` subscriber the
/// application installs.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl LoggingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for LoggingObserver {
    fn name(&self) -> &str {
        "logging"
    }

    fn on_event(
        &self,
        event: &HistoryEvent,
        history: &[CalculationRecord],
    ) -> Result<(), ObserverError> {
        match event {
            HistoryEvent::Added { record } => info!(
                operation = record.operation_name(),
                operand_a = record.operand_a(),
                operand_b = record.operand_b(),
                result = record.result(),
                history_len = history.len(),
                "calculation added"
            ),
            HistoryEvent::Cleared => info!("calculation history cleared"),
        }
        Ok(())
    }
}
