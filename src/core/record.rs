//! Calculation records.
//!
//! A record is an immutable value describing one evaluated operation.

use super::error::CalculatorError;
use crate::config::MAX_PRECISION;
use crate::operations::OperationRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One evaluated operation.
///
/// Records are immutable once created. Two records are equal when every
/// field matches, including the timestamp.
///
/// # Example
///
/// ```rust
/// use reckon::core::CalculationRecord;
/// use reckon::operations::OperationRegistry;
///
/// let registry = OperationRegistry::with_builtins();
/// let record = CalculationRecord::compute(&registry, "percent", 25.0, 200.0, 2).unwrap();
///
/// assert_eq!(record.operation_name(), "percent");
/// assert_eq!(record.result(), 12.5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    operation_name: String,
    operand_a: f64,
    operand_b: f64,
    result: f64,
    timestamp: DateTime<Utc>,
}

impl CalculationRecord {
    /// Assemble a record from already-computed parts.
    ///
    /// Used when reconstructing persisted history; no operation is run.
    pub fn new(
        operation_name: impl Into<String>,
        operand_a: f64,
        operand_b: f64,
        result: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            operation_name: operation_name.into(),
            operand_a,
            operand_b,
            result,
            timestamp,
        }
    }

    /// Resolve `operation_name`, evaluate it and round the result to
    /// `precision` decimal places (at most [`MAX_PRECISION`]).
    ///
    /// Fails with the operation's own error. A non-finite result (overflow,
    /// NaN) is rejected with [`CalculatorError::NonFiniteResult`].
    pub fn compute(
        registry: &OperationRegistry,
        operation_name: &str,
        operand_a: f64,
        operand_b: f64,
        precision: u32,
    ) -> Result<Self, CalculatorError> {
        let operation = registry.resolve(operation_name)?;
        let raw = operation.apply(operand_a, operand_b)?;
        if !raw.is_finite() {
            return Err(CalculatorError::NonFiniteResult {
                operation: operation.name().to_string(),
            });
        }

        Ok(Self::new(
            operation.name(),
            operand_a,
            operand_b,
            round_to_precision(raw, precision),
            Utc::now(),
        ))
    }

    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    pub fn operand_a(&self) -> f64 {
        self.operand_a
    }

    pub fn operand_b(&self) -> f64 {
        self.operand_b
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}) = {}",
            self.operation_name, self.operand_a, self.operand_b, self.result
        )
    }
}

/// Round to `precision` decimal places, halves away from zero.
///
/// Rounding works on the shortest decimal form of `value` (the digits it
/// prints as), so `1.005` rounds to `1.01` even though the nearest `f64`
/// lies just below the tie. `precision` is clamped to [`MAX_PRECISION`].
/// Non-finite values are returned unchanged.
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let precision = precision.min(MAX_PRECISION);
    match round_decimal_digits(value.abs(), precision) {
        Some(rounded) if rounded == 0.0 => 0.0,
        Some(rounded) => rounded.copysign(value),
        None => value,
    }
}

/// Half-away-from-zero rounding of a positive finite `value` on its
/// shortest round-trip digits.
fn round_decimal_digits(value: f64, precision: u32) -> Option<f64> {
    // `{:e}` yields the shortest digits that parse back to `value`.
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e')?;
    let exponent: i64 = exponent.parse().ok()?;
    let digits: Vec<u64> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| u64::from(b - b'0'))
        .collect();

    // value = 0.d1 d2 d3 ... * 10^(exponent + 1)
    let keep = exponent + 1 + i64::from(precision);
    if keep >= digits.len() as i64 {
        return Some(value);
    }
    if keep < 0 {
        return Some(0.0);
    }

    let keep = keep as usize;
    let mut kept = digits[..keep].iter().fold(0u64, |acc, d| acc * 10 + d);
    if digits[keep] >= 5 {
        kept += 1;
    }
    format!("{kept}e-{precision}").parse().ok()
}
