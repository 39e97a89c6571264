//! Calculation and history errors.

use thiserror::Error;

/// Errors raised while computing a calculation or navigating history.
///
/// Every variant is recoverable: the caller reports it and carries on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CalculatorError {
    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    #[error("Division by zero in '{operation}' is not allowed")]
    DivisionByZero { operation: String },

    #[error("Invalid root: {reason}")]
    InvalidRoot { reason: String },

    #[error("Invalid operand for '{operation}': {reason}")]
    InvalidOperand { operation: String, reason: String },

    #[error("Operation '{operation}' produced a non-finite result")]
    NonFiniteResult { operation: String },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

impl CalculatorError {
    /// Shorthand for a zero divisor in the named operation.
    pub fn division_by_zero(operation: &str) -> Self {
        Self::DivisionByZero {
            operation: operation.to_string(),
        }
    }
}
