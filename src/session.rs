//! Calculator session: registry, history and persistence wired together.

use crate::config::CalculatorConfig;
use crate::core::{CalculationRecord, CalculatorError, HistoryManager};
use crate::observer::Observer;
use crate::operations::OperationRegistry;
use crate::persistence::{HistoryStore, PersistenceError};
use std::sync::Arc;
use tracing::{info, warn};

/// One calculator session.
///
/// Each request runs to completion (compute, record, notify) before the
/// next one starts. A calculation that fails is never recorded.
///
/// # Example
///
/// ```rust
/// use reckon::Calculator;
///
/// let mut calc = Calculator::default();
/// let record = calc.calculate("multiply", 6.0, 7.0).unwrap();
/// assert_eq!(record.result(), 42.0);
///
/// assert!(calc.calculate("divide", 1.0, 0.0).is_err());
/// assert_eq!(calc.history().len(), 1);
/// ```
#[derive(Debug)]
pub struct Calculator {
    registry: OperationRegistry,
    history: HistoryManager,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

impl Calculator {
    /// Create a session with the built-in operations.
    pub fn new(config: CalculatorConfig) -> Self {
        Self::with_registry(config, OperationRegistry::with_builtins())
    }

    pub fn with_registry(config: CalculatorConfig, registry: OperationRegistry) -> Self {
        Self {
            registry,
            history: HistoryManager::new(config),
        }
    }

    /// Evaluate `operation` on `a` and `b` and record the result.
    pub fn calculate(
        &mut self,
        operation: &str,
        a: f64,
        b: f64,
    ) -> Result<CalculationRecord, CalculatorError> {
        let precision = self.history.config().precision();
        let record = CalculationRecord::compute(&self.registry, operation, a, b, precision)
            .inspect_err(|error| warn!(operation, a, b, %error, "calculation rejected"))?;
        self.history.add(record.clone());
        Ok(record)
    }

    pub fn undo(&mut self) -> Result<Option<CalculationRecord>, CalculatorError> {
        self.history.undo()
    }

    pub fn redo(&mut self) -> Result<Option<CalculationRecord>, CalculatorError> {
        self.history.redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn history(&self) -> &[CalculationRecord] {
        self.history.records()
    }

    pub fn history_manager(&self) -> &HistoryManager {
        &self.history
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Mutable access for registering extra operations.
    pub fn registry_mut(&mut self) -> &mut OperationRegistry {
        &mut self.registry
    }

    pub fn add_observer(&mut self, observer: Arc<dyn Observer>) -> bool {
        self.history.subscribe(observer)
    }

    pub fn remove_observer<O: Observer + ?Sized>(&mut self, observer: &Arc<O>) -> bool {
        self.history.unsubscribe(observer)
    }

    /// Write the current history to `store`.
    pub fn save(&self, store: &dyn HistoryStore) -> Result<(), PersistenceError> {
        store.save(self.history.records())?;
        info!(records = self.history.len(), "history saved");
        Ok(())
    }

    /// Replace the history with the contents of `store`.
    ///
    /// Undo and redo start over from the loaded state.
    pub fn load(&mut self, store: &dyn HistoryStore) -> Result<(), PersistenceError> {
        let records = store.load()?;
        self.history.load(records);
        info!(records = self.history.len(), "history loaded");
        Ok(())
    }
}
