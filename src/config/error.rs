//! Configuration errors.

use thiserror::Error;

/// Errors raised while building or loading a [`BehaviorConfig`](super::BehaviorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("'{field}' must be a fraction between 0.0 and 1.0, got {value}")]
    ThresholdOutOfRange { field: &'static str, value: f64 },

    #[error("'{field}' must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("'{field}' must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("selector '{field}' is empty")]
    EmptySelector { field: &'static str },

    #[error("configuration is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
