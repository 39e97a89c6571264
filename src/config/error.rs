//! Configuration errors.

use thiserror::Error;

/// A single problem found while validating a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("max_history_size must be positive")]
    ZeroHistorySize,

    #[error("max_undo_depth must be positive")]
    ZeroUndoDepth,

    #[error("precision {precision} exceeds the maximum of {max} decimal places")]
    PrecisionTooHigh { precision: u32, max: u32 },
}

/// Every violation found in a configuration that failed to load.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("invalid configuration: {}", describe(.violations))]
pub struct InvalidConfig {
    pub violations: Vec<ConfigError>,
}

fn describe(violations: &[ConfigError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
