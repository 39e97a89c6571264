//! Name-keyed registry of binary numeric functions.

use crate::core::CalculatorError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Shared binary function stored in the registry.
pub type OperationFn = Arc<dyn Fn(f64, f64) -> Result<f64, CalculatorError> + Send + Sync>;

/// A named binary operation.
///
/// The function must be pure: same operands, same result, no side effects.
///
/// # Example
///
/// ```rust
/// use reckon::operations::Operation;
///
/// let double_sum = Operation::new("double_sum", |a, b| Ok((a + b) * 2.0));
/// assert_eq!(double_sum.apply(1.0, 2.0), Ok(6.0));
/// ```
#[derive(Clone)]
pub struct Operation {
    name: String,
    func: OperationFn,
}

impl Operation {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(f64, f64) -> Result<f64, CalculatorError> + Send + Sync + 'static,
    {
        Self {
            name: normalize(&name.into()),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the operation on two operands.
    pub fn apply(&self, a: f64, b: f64) -> Result<f64, CalculatorError> {
        (self.func)(a, b)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Mapping from operation name to [`Operation`].
///
/// Names are case-insensitive; they are trimmed and lowercased on the way in.
///
/// # Example
///
/// ```rust
/// use reckon::operations::OperationRegistry;
///
/// let mut registry = OperationRegistry::with_builtins();
/// registry.register("hypot", |a, b| Ok(a.hypot(b)));
///
/// let hypot = registry.resolve("HYPOT").unwrap();
/// assert_eq!(hypot.apply(3.0, 4.0), Ok(5.0));
/// assert!(registry.resolve("nope").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct OperationRegistry {
    operations: HashMap<String, Operation>,
}

impl OperationRegistry {
    /// Create a registry with no operations.
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in operations.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, func) in super::BUILTIN_OPERATIONS {
            registry.register(*name, *func);
        }
        registry
    }

    /// Add or replace the operation registered under `name`.
    ///
    /// Returns the operation previously registered under that name, if any.
    pub fn register<F>(&mut self, name: &str, func: F) -> Option<Operation>
    where
        F: Fn(f64, f64) -> Result<f64, CalculatorError> + Send + Sync + 'static,
    {
        let operation = Operation::new(name, func);
        self.operations
            .insert(operation.name().to_string(), operation)
    }

    /// Look up an operation by name.
    pub fn resolve(&self, name: &str) -> Result<&Operation, CalculatorError> {
        self.operations
            .get(&normalize(name))
            .ok_or_else(|| CalculatorError::UnknownOperation {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(&normalize(name))
    }

    /// Registered names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registry_is_empty() {
        let registry = OperationRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.names().is_empty());
    }

    #[test]
    fn resolve_unknown_operation_fails() {
        let registry = OperationRegistry::new();
        let err = registry.resolve("add").unwrap_err();
        assert_eq!(
            err,
            CalculatorError::UnknownOperation {
                name: "add".to_string()
            }
        );
    }

    #[test]
    fn register_then_resolve() {
        let mut registry = OperationRegistry::new();
        let previous = registry.register("max", |a: f64, b: f64| Ok(a.max(b)));
        assert!(previous.is_none());

        let max = registry.resolve("max").unwrap();
        assert_eq!(max.name(), "max");
        assert_eq!(max.apply(2.0, 7.0), Ok(7.0));
    }

    #[test]
    fn register_replaces_existing_operation() {
        let mut registry = OperationRegistry::with_builtins();
        let previous = registry.register("add", |a: f64, b: f64| Ok(a + b + 1.0));

        assert_eq!(previous.map(|op| op.name().to_string()), Some("add".to_string()));
        assert_eq!(registry.resolve("add").unwrap().apply(1.0, 1.0), Ok(3.0));
    }

    #[test]
    fn names_are_case_insensitive() {
        let mut registry = OperationRegistry::new();
        registry.register("  Mean ", |a: f64, b: f64| Ok((a + b) / 2.0));

        assert!(registry.contains("MEAN"));
        assert_eq!(registry.resolve("mean").unwrap().apply(2.0, 4.0), Ok(3.0));
        assert_eq!(registry.names(), vec!["mean"]);
    }

    #[test]
    fn builtins_are_listed_sorted() {
        let registry = OperationRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec![
                "abs_diff",
                "add",
                "divide",
                "int_divide",
                "modulus",
                "multiply",
                "percent",
                "power",
                "root",
                "subtract",
            ]
        );
    }

    #[test]
    fn operation_debug_shows_name() {
        let op = Operation::new("add", |a, b| Ok(a + b));
        assert!(format!("{:?}", op).contains("add"));
    }
}
