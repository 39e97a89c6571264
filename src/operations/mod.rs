//! Operation registry and the built-in arithmetic operations.
//!
//! Operations are pure binary functions keyed by name. Adding a new one is a
//! registration call on [`OperationRegistry`]; nothing else changes.

mod builtin;
mod registry;

pub use builtin::BUILTIN_OPERATIONS;
pub use registry::{Operation, OperationFn, OperationRegistry};
