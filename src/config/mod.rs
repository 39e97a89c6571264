//! Calculator configuration.
//!
//! The configuration is immutable once built. Loading it from files or the
//! environment is left to the embedding application; `CalculatorConfig`
//! implements `Deserialize` so any serde format works, and deserializing
//! runs the same validation as the builder.
//!
//! # Example
//!
//! ```rust
//! use reckon::config::CalculatorConfig;
//!
//! let config = CalculatorConfig::builder()
//!     .max_history_size(50)
//!     .precision(4)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_history_size(), 50);
//! assert_eq!(config.precision(), 4);
//! assert_eq!(config.max_undo_depth(), 100);
//! ```

pub mod error;

pub use error::{ConfigError, InvalidConfig};

use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Largest supported number of decimal places.
pub const MAX_PRECISION: u32 = 15;

pub const DEFAULT_MAX_HISTORY_SIZE: usize = 100;
pub const DEFAULT_PRECISION: u32 = 2;
pub const DEFAULT_MAX_UNDO_DEPTH: usize = 100;

/// Settings consumed by the history core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCalculatorConfig")]
pub struct CalculatorConfig {
    max_history_size: usize,
    precision: u32,
    max_undo_depth: usize,
}

/// Unvalidated wire form of [`CalculatorConfig`].
#[derive(Deserialize)]
#[serde(default)]
struct RawCalculatorConfig {
    max_history_size: usize,
    precision: u32,
    max_undo_depth: usize,
}

impl Default for RawCalculatorConfig {
    fn default() -> Self {
        let defaults = CalculatorConfig::default();
        Self {
            max_history_size: defaults.max_history_size,
            precision: defaults.precision,
            max_undo_depth: defaults.max_undo_depth,
        }
    }
}

impl TryFrom<RawCalculatorConfig> for CalculatorConfig {
    type Error = InvalidConfig;

    fn try_from(raw: RawCalculatorConfig) -> Result<Self, Self::Error> {
        CalculatorConfig::builder()
            .max_history_size(raw.max_history_size)
            .precision(raw.precision)
            .max_undo_depth(raw.max_undo_depth)
            .build()
            .map_err(|errors| InvalidConfig {
                violations: errors.iter().cloned().collect(),
            })
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            precision: DEFAULT_PRECISION,
            max_undo_depth: DEFAULT_MAX_UNDO_DEPTH,
        }
    }
}

impl CalculatorConfig {
    pub fn builder() -> CalculatorConfigBuilder {
        CalculatorConfigBuilder::new()
    }

    /// Maximum number of records kept; older ones are evicted first.
    pub fn max_history_size(&self) -> usize {
        self.max_history_size
    }

    /// Decimal places results are rounded to.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Maximum number of snapshots kept on each of the undo and redo stacks.
    pub fn max_undo_depth(&self) -> usize {
        self.max_undo_depth
    }

    /// Check every setting, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let checks = vec![
            if self.max_history_size == 0 {
                Validation::fail(ConfigError::ZeroHistorySize)
            } else {
                Validation::success(())
            },
            if self.max_undo_depth == 0 {
                Validation::fail(ConfigError::ZeroUndoDepth)
            } else {
                Validation::success(())
            },
            if self.precision > MAX_PRECISION {
                Validation::fail(ConfigError::PrecisionTooHigh {
                    precision: self.precision,
                    max: MAX_PRECISION,
                })
            } else {
                Validation::success(())
            },
        ];

        Validation::all_vec(checks).map(|_| ())
    }
}

/// Fluent builder for [`CalculatorConfig`].
#[derive(Debug, Default)]
pub struct CalculatorConfigBuilder {
    config: CalculatorConfig,
}

impl CalculatorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_history_size(mut self, size: usize) -> Self {
        self.config.max_history_size = size;
        self
    }

    pub fn precision(mut self, places: u32) -> Self {
        self.config.precision = places;
        self
    }

    pub fn max_undo_depth(mut self, depth: usize) -> Self {
        self.config.max_undo_depth = depth;
        self
    }

    /// Validate and return the configuration, or every violation found.
    pub fn build(self) -> Result<CalculatorConfig, NonEmptyVec<ConfigError>> {
        match self.config.validate() {
            Validation::Success(_) => Ok(self.config),
            Validation::Failure(errors) => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.max_history_size(), 100);
        assert_eq!(config.precision(), 2);
        assert_eq!(config.max_undo_depth(), 100);
        assert!(config.validate().is_success());
    }

    #[test]
    fn builder_accumulates_all_violations() {
        let result = CalculatorConfig::builder()
            .max_history_size(0)
            .max_undo_depth(0)
            .precision(20)
            .build();

        match result {
            Err(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| *e == ConfigError::ZeroHistorySize));
                assert!(errors.iter().any(|e| *e == ConfigError::ZeroUndoDepth));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigError::PrecisionTooHigh { precision: 20, .. })));
            }
            Ok(_) => panic!("Expected violations, got a config"),
        }
    }

    #[test]
    fn zero_precision_is_valid() {
        let config = CalculatorConfig::builder().precision(0).build().unwrap();
        assert_eq!(config.precision(), 0);
    }

    #[test]
    fn deserializing_rejects_invalid_settings() {
        let result: Result<CalculatorConfig, _> = serde_json::from_str(
            r#"{ "max_history_size": 0, "max_undo_depth": 0, "precision": 99 }"#,
        );

        let message = result.unwrap_err().to_string();
        assert!(message.contains("max_history_size must be positive"));
        assert!(message.contains("max_undo_depth must be positive"));
        assert!(message.contains("precision 99 exceeds"));
    }

    #[test]
    fn deserializing_rejects_zero_history_size() {
        let result: Result<CalculatorConfig, _> =
            serde_json::from_str(r#"{ "max_history_size": 0 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn serialized_config_deserializes_back() {
        let config = CalculatorConfig::builder()
            .max_history_size(7)
            .precision(3)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: CalculatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn deserializes_with_defaults_for_missing_fields() {
        let config: CalculatorConfig =
            serde_json::from_str(r#"{ "max_history_size": 2 }"#).unwrap();
        assert_eq!(config.max_history_size(), 2);
        assert_eq!(config.precision(), DEFAULT_PRECISION);
        assert_eq!(config.max_undo_depth(), DEFAULT_MAX_UNDO_DEPTH);
    }
}
