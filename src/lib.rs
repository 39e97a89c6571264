//! Reckon: the calculation history core of an interactive calculator.
//!
//! Arithmetic is stateless; the interesting part is what happens to each
//! result afterwards. Reckon keeps a bounded, ordered history of
//! calculations with snapshot-based undo/redo, tells registered observers
//! about every change, and round-trips the history through durable storage.
//!
//! # Core Concepts
//!
//! - **Operations**: Pure binary functions looked up by name in a registry
//! - **Records**: Immutable values describing one evaluated operation
//! - **History**: Bounded record sequence with undo/redo snapshots
//! - **Observers**: Collaborators notified after every mutation
//! - **Persistence**: Versioned documents stored as JSON or bincode
//!
//! # Example
//!
//! ```rust
//! use reckon::observer::{AutoSaveObserver, LoggingObserver};
//! use reckon::persistence::{HistoryStore, MemoryStore};
//! use reckon::Calculator;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let mut calc = Calculator::default();
//! calc.add_observer(Arc::new(LoggingObserver::new()));
//! calc.add_observer(Arc::new(AutoSaveObserver::new(store.clone())));
//!
//! calc.calculate("add", 10.0, 5.0).unwrap();
//! calc.calculate("percent", 25.0, 200.0).unwrap();
//!
//! assert_eq!(store.load().unwrap().len(), 2);
//!
//! let undone = calc.undo().unwrap().unwrap();
//! assert_eq!(undone.to_string(), "percent(25, 200) = 12.5");
//! ```

pub mod config;
pub mod core;
pub mod observer;
pub mod operations;
pub mod persistence;
mod session;

// Re-export commonly used types
pub use config::CalculatorConfig;
pub use crate::core::{CalculationRecord, CalculatorError, HistoryManager};
pub use observer::{HistoryEvent, NotificationHub, Observer};
pub use operations::OperationRegistry;
pub use session::Calculator;
