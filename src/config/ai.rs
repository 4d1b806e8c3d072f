//! Chat-completion API configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::session::{DEFAULT_MODEL, SUPPORTED_MODELS};
use crate::ports::DEFAULT_BASE_URL;

/// Chat-completion API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenRouter API key; may also be entered interactively
    pub api_key: Option<Secret<String>>,

    /// Model identifier, one of the supported models
    #[serde(default = "default_model")]
    pub model: String,

    /// API root, `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt timeout for completions in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Timeout for the connectivity probe in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Total attempts per completion, including the first
    #[serde(default = "default_attempts")]
    pub max_attempts: u32,

    /// Delay before the second attempt; doubles afterwards
    #[serde(default = "default_backoff_ms")]
    pub initial_backoff_ms: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !SUPPORTED_MODELS.contains(&self.model.as_str()) {
            return Err(ValidationError::UnsupportedModel(self.model.clone()));
        }

        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }

        if self.timeout_secs == 0 || self.probe_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidAttempts);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            probe_timeout_secs: default_probe_timeout(),
            max_attempts: default_attempts(),
            initial_backoff_ms: default_backoff_ms(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_probe_timeout() -> u64 {
    15
}

fn default_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    1000
}
