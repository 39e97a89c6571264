//! History events and the observers that react to them.
//!
//! The [`NotificationHub`] keeps an ordered list of observers and delivers
//! every event to each one synchronously. Observers get read-only access to
//! the event and the current record sequence; they cannot touch history state.

mod autosave;
pub mod error;
mod logging;

pub use autosave::AutoSaveObserver;
pub use error::ObserverError;
pub use logging::LoggingObserver;

use crate::core::CalculationRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Event emitted after a mutating history operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum HistoryEvent {
    /// A calculation was appended.
    Added { record: CalculationRecord },
    /// The history was emptied.
    Cleared,
}

/// Receiver of history events.
pub trait Observer: Send + Sync {
    /// Short name used when logging delivery failures.
    fn name(&self) -> &str;

    /// Handle one event. `history` is the record sequence after the mutation.
    fn on_event(
        &self,
        event: &HistoryEvent,
        history: &[CalculationRecord],
    ) -> Result<(), ObserverError>;
}

/// Ordered set of observers.
///
/// Subscription is idempotent by identity: subscribing the same `Arc` twice
/// keeps a single entry, so it is notified once per event.
///
/// # Example
///
/// ```rust
/// use reckon::observer::{LoggingObserver, NotificationHub, Observer};
/// use std::sync::Arc;
///
/// let mut hub = NotificationHub::new();
/// let logger: Arc<dyn Observer> = Arc::new(LoggingObserver::new());
///
/// assert!(hub.subscribe(logger.clone()));
/// assert!(!hub.subscribe(logger.clone()));
/// assert_eq!(hub.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct NotificationHub {
    observers: Vec<Arc<dyn Observer>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Register an observer. Returns `false` if it was already registered.
    pub fn subscribe(&mut self, observer: Arc<dyn Observer>) -> bool {
        if self.position(&observer).is_some() {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe<O: Observer + ?Sized>(&mut self, observer: &Arc<O>) -> bool {
        match self.position(observer) {
            Some(index) => {
                self.observers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Deliver `event` to every observer in subscription order.
    ///
    /// A failing observer is logged and skipped. Returns the number of
    /// observers that failed.
    pub fn notify(&self, event: &HistoryEvent, history: &[CalculationRecord]) -> usize {
        let mut failures = 0;
        for observer in &self.observers {
            if let Err(error) = observer.on_event(event, history) {
                failures += 1;
                warn!(observer = observer.name(), %error, "observer failed to handle history event");
            }
        }
        failures
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    fn position<O: Observer + ?Sized>(&self, observer: &Arc<O>) -> Option<usize> {
        let target = Arc::as_ptr(observer) as *const ();
        self.observers
            .iter()
            .position(|existing| Arc::as_ptr(existing) as *const () == target)
    }
}

impl fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.observers.iter().map(|o| o.name()))
            .finish()
    }
}
