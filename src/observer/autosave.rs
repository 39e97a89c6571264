//! Observer that persists the history after every event.

use super::{HistoryEvent, Observer, ObserverError};
use crate::core::CalculationRecord;
use crate::persistence::HistoryStore;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Saves the full record sequence to a [`HistoryStore`] on each event.
///
/// Save failures are returned to the hub, which logs them; the in-memory
/// history is unaffected.
pub struct AutoSaveObserver {
    store: Arc<dyn HistoryStore>,
}

impl AutoSaveObserver {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store }
    }
}

impl Observer for AutoSaveObserver {
    fn name(&self) -> &str {
        "autosave"
    }

    fn on_event(
        &self,
        _event: &HistoryEvent,
        history: &[CalculationRecord],
    ) -> Result<(), ObserverError> {
        self.store.save(history)?;
        debug!(records = history.len(), "history auto-saved");
        Ok(())
    }
}

impl fmt::Debug for AutoSaveObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoSaveObserver").finish_non_exhaustive()
    }
}
