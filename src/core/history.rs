//! Bounded calculation history with snapshot-based undo/redo.
//!
//! Every mutation (`add`, `clear`) captures the pre-mutation records as a
//! snapshot on the undo stack before touching anything, then notifies
//! the registered observers. Undo and redo swap whole snapshots, so a
//! restored state is always complete.

use super::error::CalculatorError;
use super::record::CalculationRecord;
use super::snapshot::Snapshot;
use crate::config::CalculatorConfig;
use crate::observer::{HistoryEvent, NotificationHub, Observer};
use std::sync::Arc;
use tracing::debug;

/// Ordered, bounded history of calculations.
///
/// Records are kept in chronological order and capped at
/// `max_history_size`; appending past the cap evicts the oldest record in
/// the same transition as the append. The undo and redo stacks are capped at
/// `max_undo_depth`, dropping their oldest snapshot when full.
///
/// Not safe for concurrent mutation. Wrap the whole manager in one mutex if
/// it must be shared between threads.
///
/// # Example
///
/// ```rust
/// use reckon::config::CalculatorConfig;
/// use reckon::core::{CalculationRecord, HistoryManager};
/// use reckon::operations::OperationRegistry;
///
/// let registry = OperationRegistry::with_builtins();
/// let config = CalculatorConfig::builder().max_history_size(2).build().unwrap();
/// let mut history = HistoryManager::new(config);
///
/// for (op, a, b) in [("add", 10.0, 5.0), ("power", 2.0, 8.0), ("percent", 25.0, 200.0)] {
///     history.add(CalculationRecord::compute(&registry, op, a, b, 2).unwrap());
/// }
///
/// let names: Vec<_> = history.records().iter().map(|r| r.operation_name()).collect();
/// assert_eq!(names, ["power", "percent"]);
///
/// let undone = history.undo().unwrap().unwrap();
/// assert_eq!(undone.operation_name(), "percent");
///
/// let names: Vec<_> = history.records().iter().map(|r| r.operation_name()).collect();
/// assert_eq!(names, ["add", "power"]);
/// ```
#[derive(Debug)]
pub struct HistoryManager {
    config: CalculatorConfig,
    records: Vec<CalculationRecord>,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    hub: NotificationHub,
}

impl HistoryManager {
    /// Create an empty history.
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            hub: NotificationHub::new(),
        }
    }

    /// Create a history seeded with previously persisted records.
    ///
    /// Only the newest `max_history_size` records are kept. Both stacks
    /// start empty.
    pub fn with_records(config: CalculatorConfig, records: Vec<CalculationRecord>) -> Self {
        let mut history = Self::new(config);
        history.load(records);
        history
    }

    /// Replace the records with a loaded sequence and forget undo/redo.
    ///
    /// Observers are not notified; nothing was calculated.
    pub fn load(&mut self, records: Vec<CalculationRecord>) {
        self.records = records;
        self.evict_overflow();
        self.undo_stack.clear();
        self.redo_stack.clear();
        debug!(records = self.records.len(), "history loaded");
    }

    /// Append a calculation, evicting the oldest record if over capacity.
    pub fn add(&mut self, record: CalculationRecord) {
        self.push_undo(Snapshot::capture(&self.records, Some(record.clone())));
        self.redo_stack.clear();
        self.records.push(record.clone());
        self.evict_overflow();

        debug!(
            operation = record.operation_name(),
            records = self.records.len(),
            "calculation recorded"
        );
        self.hub
            .notify(&HistoryEvent::Added { record }, &self.records);
    }

    /// Remove every record. Undoable.
    pub fn clear(&mut self) {
        self.push_undo(Snapshot::capture(&self.records, None));
        self.redo_stack.clear();
        self.records.clear();

        debug!("history cleared");
        self.hub.notify(&HistoryEvent::Cleared, &self.records);
    }

    /// Restore the state before the last mutation.
    ///
    /// Returns the record the restoration removed: the one the undone
    /// `add` appended, even when an equal record is still present.
    /// Undoing a `clear` removes nothing and returns `None`.
    pub fn undo(&mut self) -> Result<Option<CalculationRecord>, CalculatorError> {
        let snapshot = self
            .undo_stack
            .pop()
            .ok_or(CalculatorError::NothingToUndo)?;
        let (records, removed) = snapshot.into_parts();
        let previous = std::mem::replace(&mut self.records, records);
        self.push_redo(Snapshot::from_records(previous, removed.clone()));

        debug!(records = self.records.len(), "undo applied");
        Ok(removed)
    }

    /// Re-apply the last undone mutation.
    ///
    /// Returns the record the redone `add` appended. Redoing a `clear`
    /// returns `None`.
    pub fn redo(&mut self) -> Result<Option<CalculationRecord>, CalculatorError> {
        let snapshot = self
            .redo_stack
            .pop()
            .ok_or(CalculatorError::NothingToRedo)?;
        let (records, restored) = snapshot.into_parts();
        let previous = std::mem::replace(&mut self.records, records);
        self.push_undo(Snapshot::from_records(previous, restored.clone()));

        debug!(records = self.records.len(), "redo applied");
        Ok(restored)
    }

    /// Current records, oldest first.
    pub fn records(&self) -> &[CalculationRecord] {
        &self.records
    }

    /// Most recent record, if any.
    pub fn latest(&self) -> Option<&CalculationRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Register an observer for history events. See [`NotificationHub::subscribe`].
    pub fn subscribe(&mut self, observer: Arc<dyn Observer>) -> bool {
        self.hub.subscribe(observer)
    }

    pub fn unsubscribe<O: Observer + ?Sized>(&mut self, observer: &Arc<O>) -> bool {
        self.hub.unsubscribe(observer)
    }

    pub fn observers(&self) -> &NotificationHub {
        &self.hub
    }

    fn evict_overflow(&mut self) {
        let max = self.config.max_history_size();
        if self.records.len() > max {
            let excess = self.records.len() - max;
            self.records.drain(..excess);
        }
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        push_bounded(&mut self.undo_stack, snapshot, self.config.max_undo_depth());
    }

    fn push_redo(&mut self, snapshot: Snapshot) {
        push_bounded(&mut self.redo_stack, snapshot, self.config.max_undo_depth());
    }
}

fn push_bounded(stack: &mut Vec<Snapshot>, snapshot: Snapshot, depth: usize) {
    stack.push(snapshot);
    if stack.len() > depth {
        let excess = stack.len() - depth;
        stack.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::ObserverError;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Mutex;

    fn record(name: &str, n: i64) -> CalculationRecord {
        let timestamp = Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(n);
        CalculationRecord::new(name, n as f64, 1.0, n as f64 + 1.0, timestamp)
    }

    fn config(max_history_size: usize, max_undo_depth: usize) -> CalculatorConfig {
        CalculatorConfig::builder()
            .max_history_size(max_history_size)
            .max_undo_depth(max_undo_depth)
            .build()
            .unwrap()
    }

    fn history() -> HistoryManager {
        HistoryManager::new(CalculatorConfig::default())
    }

    #[derive(Default)]
    struct EventLog {
        events: Mutex<Vec<HistoryEvent>>,
    }

    impl Observer for EventLog {
        fn name(&self) -> &str {
            "event-log"
        }

        fn on_event(
            &self,
            event: &HistoryEvent,
            _history: &[CalculationRecord],
        ) -> Result<(), ObserverError> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    struct Broken;

    impl Observer for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn on_event(&self, _: &HistoryEvent, _: &[CalculationRecord]) -> Result<(), ObserverError> {
            Err(ObserverError::Failed("always fails".to_string()))
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = history();
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.latest().is_none());
    }

    #[test]
    fn add_appends_in_order() {
        let mut history = history();
        history.add(record("add", 1));
        history.add(record("subtract", 2));

        assert_eq!(history.records(), &[record("add", 1), record("subtract", 2)]);
        assert_eq!(history.latest(), Some(&record("subtract", 2)));
        assert_eq!(history.undo_depth(), 2);
    }

    #[test]
    fn undo_on_fresh_history_fails() {
        let mut history = history();
        assert_eq!(history.undo(), Err(CalculatorError::NothingToUndo));
        assert_eq!(history.redo(), Err(CalculatorError::NothingToRedo));
    }

    #[test]
    fn undo_returns_removed_record() {
        let mut history = history();
        history.add(record("add", 1));

        assert_eq!(history.undo(), Ok(Some(record("add", 1))));
        assert!(history.is_empty());
        assert!(history.can_redo());
    }

    #[test]
    fn redo_returns_restored_record() {
        let mut history = history();
        history.add(record("add", 1));
        history.undo().unwrap();

        assert_eq!(history.redo(), Ok(Some(record("add", 1))));
        assert_eq!(history.records(), &[record("add", 1)]);
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn new_calculation_discards_redo() {
        let mut history = history();
        history.add(record("a", 1));
        history.add(record("b", 2));
        history.undo().unwrap();
        history.add(record("c", 3));

        assert!(!history.can_redo());
        assert_eq!(history.records(), &[record("a", 1), record("c", 3)]);
        assert_eq!(history.redo(), Err(CalculatorError::NothingToRedo));
    }

    #[test]
    fn clear_then_undo_restores_everything() {
        let mut history = history();
        history.add(record("a", 1));
        history.add(record("b", 2));
        history.clear();
        assert!(history.is_empty());

        assert_eq!(history.undo(), Ok(None));
        assert_eq!(history.records(), &[record("a", 1), record("b", 2)]);

        assert_eq!(history.redo(), Ok(None));
        assert!(history.is_empty());
    }

    #[test]
    fn eviction_is_fifo() {
        let mut history = HistoryManager::new(config(2, 100));
        history.add(record("a", 1));
        history.add(record("b", 2));
        history.add(record("c", 3));

        assert_eq!(history.records(), &[record("b", 2), record("c", 3)]);
    }

    #[test]
    fn undo_after_eviction_restores_evicted_record() {
        let mut history = HistoryManager::new(config(2, 100));
        history.add(record("a", 1));
        history.add(record("b", 2));
        history.add(record("c", 3));

        assert_eq!(history.undo(), Ok(Some(record("c", 3))));
        assert_eq!(history.records(), &[record("a", 1), record("b", 2)]);
    }

    #[test]
    fn undo_depth_is_bounded() {
        let mut history = HistoryManager::new(config(100, 2));
        for n in 0..5 {
            history.add(record("add", n));
        }

        assert_eq!(history.undo_depth(), 2);
        history.undo().unwrap();
        history.undo().unwrap();
        assert_eq!(history.undo(), Err(CalculatorError::NothingToUndo));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn redo_depth_is_bounded() {
        let mut history = HistoryManager::new(config(100, 2));
        for n in 0..5 {
            history.add(record("add", n));
        }
        history.undo().unwrap();
        history.undo().unwrap();
        assert_eq!(history.redo_depth(), 2);

        let mut history = HistoryManager::new(config(100, 3));
        for n in 0..5 {
            history.add(record("add", n));
        }
        for _ in 0..3 {
            history.undo().unwrap();
        }
        assert_eq!(history.redo_depth(), 3);
        assert_eq!(history.undo_depth(), 0);

        for _ in 0..3 {
            history.redo().unwrap();
        }
        assert_eq!(history.redo(), Err(CalculatorError::NothingToRedo));
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn redo_stack_drops_oldest_snapshot_when_full() {
        let mut history = HistoryManager::new(config(100, 2));
        for n in 0..3 {
            history.push_redo(Snapshot::capture(&[record("add", n)], Some(record("add", n))));
        }
        assert_eq!(history.redo_depth(), 2);

        assert_eq!(history.redo(), Ok(Some(record("add", 2))));
        assert_eq!(history.redo(), Ok(Some(record("add", 1))));
        assert_eq!(history.redo(), Err(CalculatorError::NothingToRedo));
    }

    #[test]
    fn redo_replays_within_undo_depth() {
        let mut history = HistoryManager::new(config(100, 2));
        for n in 0..3 {
            history.add(record("add", n));
        }
        history.undo().unwrap();
        history.undo().unwrap();
        assert_eq!(history.redo_depth(), 2);
        assert_eq!(history.len(), 1);

        // Redo pushes onto the undo stack, which is also capped.
        assert_eq!(history.redo(), Ok(Some(record("add", 1))));
        assert_eq!(history.redo(), Ok(Some(record("add", 2))));
        assert_eq!(history.undo_depth(), 2);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn undo_reports_duplicate_record() {
        let mut history = history();
        history.add(record("add", 1));
        history.add(record("add", 1));

        assert_eq!(history.undo(), Ok(Some(record("add", 1))));
        assert_eq!(history.records(), &[record("add", 1)]);
        assert_eq!(history.redo(), Ok(Some(record("add", 1))));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn undo_reports_duplicate_after_load() {
        let mut history = HistoryManager::with_records(
            CalculatorConfig::default(),
            vec![record("add", 7)],
        );
        history.add(record("add", 7));

        assert_eq!(history.undo(), Ok(Some(record("add", 7))));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn with_records_keeps_newest_and_empty_stacks() {
        let records = (0..5).map(|n| record("add", n)).collect();
        let history = HistoryManager::with_records(config(3, 100), records);

        assert_eq!(
            history.records(),
            &[record("add", 2), record("add", 3), record("add", 4)]
        );
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn load_resets_stacks() {
        let mut history = history();
        history.add(record("a", 1));
        history.add(record("b", 2));
        history.undo().unwrap();

        history.load(vec![record("z", 9)]);

        assert_eq!(history.records(), &[record("z", 9)]);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn observers_receive_add_and_clear() {
        let log = Arc::new(EventLog::default());
        let mut history = history();
        history.subscribe(log.clone());

        history.add(record("a", 1));
        history.clear();
        history.undo().unwrap();

        let events = log.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                HistoryEvent::Added {
                    record: record("a", 1)
                },
                HistoryEvent::Cleared,
            ]
        );
    }

    #[test]
    fn failing_observer_leaves_history_intact() {
        let log = Arc::new(EventLog::default());
        let mut history = history();
        history.subscribe(Arc::new(Broken));
        history.subscribe(log.clone());

        history.add(record("a", 1));

        assert_eq!(history.records(), &[record("a", 1)]);
        assert_eq!(log.events.lock().unwrap().len(), 1);
    }

    #[test]
    fn unsubscribed_observer_stops_receiving() {
        let log = Arc::new(EventLog::default());
        let mut history = history();
        history.subscribe(log.clone());
        assert!(history.unsubscribe(&log));

        history.add(record("a", 1));

        assert!(log.events.lock().unwrap().is_empty());
        assert!(history.observers().is_empty());
    }
}
