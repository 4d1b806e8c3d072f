//! Consultant chat configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Consultant chat configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConsultantConfig {
    /// Start sessions in short-answer mode
    #[serde(default)]
    pub short_mode: bool,

    /// Token budget for long-form answers
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Token budget for short-form answers
    #[serde(default = "default_short_max_tokens")]
    pub short_max_tokens: u32,

    /// Characters of an attached file kept as context
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl ConsultantConfig {
    /// Token budget for the given verbosity.
    pub fn max_tokens_for(&self, short_mode: bool) -> u32 {
        if short_mode {
            self.short_max_tokens
        } else {
            self.max_tokens
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_tokens == 0 || self.short_max_tokens == 0 {
            return Err(ValidationError::InvalidTokenBudget("consultant"));
        }
        super::validate_temperature("consultant", self.temperature)
    }
}

impl Default for ConsultantConfig {
    fn default() -> Self {
        Self {
            short_mode: false,
            max_tokens: default_max_tokens(),
            short_max_tokens: default_short_max_tokens(),
            max_context_chars: default_max_context_chars(),
            temperature: default_temperature(),
        }
    }
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_short_max_tokens() -> u32 {
    512
}

fn default_max_context_chars() -> usize {
    8000
}

fn default_temperature() -> f32 {
    0.7
}
