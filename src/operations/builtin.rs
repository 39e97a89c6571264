//! Built-in arithmetic operations.
//!
//! None of these enforce magnitude limits; the caller bounds its inputs.

use crate::core::CalculatorError;

type Builtin = fn(f64, f64) -> Result<f64, CalculatorError>;

/// Operations every [`super::OperationRegistry::with_builtins`] starts with.
pub const BUILTIN_OPERATIONS: &[(&str, Builtin)] = &[
    ("add", add),
    ("subtract", subtract),
    ("multiply", multiply),
    ("divide", divide),
    ("power", power),
    ("root", root),
    ("modulus", modulus),
    ("int_divide", int_divide),
    ("percent", percent),
    ("abs_diff", abs_diff),
];

fn add(a: f64, b: f64) -> Result<f64, CalculatorError> {
    Ok(a + b)
}

fn subtract(a: f64, b: f64) -> Result<f64, CalculatorError> {
    Ok(a - b)
}

fn multiply(a: f64, b: f64) -> Result<f64, CalculatorError> {
    Ok(a * b)
}

fn divide(a: f64, b: f64) -> Result<f64, CalculatorError> {
    if b == 0.0 {
        return Err(CalculatorError::division_by_zero("divide"));
    }
    Ok(a / b)
}

fn power(a: f64, b: f64) -> Result<f64, CalculatorError> {
    if b < 0.0 {
        return Err(CalculatorError::InvalidOperand {
            operation: "power".to_string(),
            reason: "negative exponents are not supported".to_string(),
        });
    }
    Ok(a.powf(b))
}

/// `b`-th root of `a`.
fn root(a: f64, b: f64) -> Result<f64, CalculatorError> {
    if b <= 0.0 {
        return Err(CalculatorError::InvalidRoot {
            reason: format!("root index must be positive, got {b}"),
        });
    }
    if a < 0.0 {
        return Err(CalculatorError::InvalidRoot {
            reason: "cannot take the root of a negative number".to_string(),
        });
    }
    Ok(a.powf(1.0 / b))
}

/// Remainder carrying the sign of the dividend.
fn modulus(a: f64, b: f64) -> Result<f64, CalculatorError> {
    if b == 0.0 {
        return Err(CalculatorError::division_by_zero("modulus"));
    }
    Ok(a % b)
}

/// Floor of the quotient.
fn int_divide(a: f64, b: f64) -> Result<f64, CalculatorError> {
    if b == 0.0 {
        return Err(CalculatorError::division_by_zero("int_divide"));
    }
    Ok((a / b).floor())
}

/// `a` as a percentage of `b`.
fn percent(a: f64, b: f64) -> Result<f64, CalculatorError> {
    if b == 0.0 {
        return Err(CalculatorError::division_by_zero("percent"));
    }
    Ok(a / b * 100.0)
}

fn abs_diff(a: f64, b: f64) -> Result<f64, CalculatorError> {
    Ok((a - b).abs())
}
