//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Annual work hours per FTE must be positive")]
    InvalidWorkHours,

    #[error("Annual cost per FTE must be positive")]
    InvalidFteCost,

    #[error("Recommendation threshold must be a non-negative number")]
    InvalidThreshold,

    #[error("Maximum resolution passes must be at least 1")]
    InvalidMaxPasses,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
