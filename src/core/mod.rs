//! Calculation history core.
//!
//! This module contains the stateful heart of the calculator:
//! - Immutable calculation records
//! - Private snapshots used for undo/redo
//! - The bounded history manager that owns both

mod error;
mod history;
mod record;
mod snapshot;

pub use error::CalculatorError;
pub use history::HistoryManager;
pub use record::{round_to_precision, CalculationRecord};
