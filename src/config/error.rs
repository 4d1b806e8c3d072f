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
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("max_attempts must be at least 1")]
    InvalidAttempts,

    #[error("Token budget for {0} must be positive")]
    InvalidTokenBudget(&'static str),

    #[error("Temperature for {section} must be within 0.0..=2.0, got {value}")]
    InvalidTemperature { section: &'static str, value: f32 },
}
