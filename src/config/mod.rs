//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `STRATEGIC_ANALYST` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use strategic_analyst::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Using model {}", config.ai.model);
//! ```

mod ai;
mod analysis;
mod consultant;
mod error;

pub use ai::AiConfig;
pub use analysis::AnalysisConfig;
pub use consultant::ConsultantConfig;
pub use error::{ConfigError, ValidationError};

use secrecy::Secret;
use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration (the API key can be entered interactively).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Chat-completion API (key, model, timeouts, retry)
    #[serde(default)]
    pub ai: AiConfig,

    /// Consultant chat (token budgets, context size)
    #[serde(default)]
    pub consultant: ConsultantConfig,

    /// Batch analysis (template, sampling)
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `STRATEGIC_ANALYST` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `STRATEGIC_ANALYST__AI__API_KEY=sk-or-...` -> `ai.api_key`
    /// - `STRATEGIC_ANALYST__CONSULTANT__SHORT_MODE=true` -> `consultant.short_mode`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STRATEGIC_ANALYST")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration, apply an API key override, then validate
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` if the environment cannot be parsed and
    /// `ConfigError::ValidationFailed` if a value is out of range.
    pub fn load_validated(api_key: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::load()?;
        if let Some(key) = api_key {
            config.ai.api_key = Some(Secret::new(key));
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.consultant.validate()?;
        self.analysis.validate()?;
        Ok(())
    }
}

fn validate_temperature(section: &'static str, value: f32) -> Result<(), ValidationError> {
    if (0.0..=2.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTemperature { section, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prompts::AnalysisTemplate;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "STRATEGIC_ANALYST__AI__API_KEY",
        "STRATEGIC_ANALYST__AI__TIMEOUT_SECS",
        "STRATEGIC_ANALYST__CONSULTANT__SHORT_MODE",
        "STRATEGIC_ANALYST__ANALYSIS__TEMPLATE",
        "STRATEGIC_ANALYST__ANALYSIS__TEMPERATURE",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ai.timeout_secs, 30);
        assert_eq!(config.consultant.max_tokens, 4096);
        assert_eq!(config.analysis.max_tokens, 600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("STRATEGIC_ANALYST__AI__API_KEY", "sk-or-v1-test");
        env::set_var("STRATEGIC_ANALYST__AI__TIMEOUT_SECS", "45");
        env::set_var("STRATEGIC_ANALYST__CONSULTANT__SHORT_MODE", "true");
        env::set_var("STRATEGIC_ANALYST__ANALYSIS__TEMPLATE", "investment");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.ai.api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("sk-or-v1-test")
        );
        assert_eq!(config.ai.timeout_secs, 45);
        assert!(config.consultant.short_mode);
        assert_eq!(config.analysis.template, AnalysisTemplate::Investment);
    }

    #[test]
    fn test_validate_rejects_bad_temperature() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("STRATEGIC_ANALYST__ANALYSIS__TEMPERATURE", "3.5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTemperature { section: "analysis", .. })
        ));
    }

    #[test]
    fn test_load_validated_reports_validation_failure() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("STRATEGIC_ANALYST__ANALYSIS__TEMPERATURE", "3.5");
        let result = AppConfig::load_validated(None);
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed(ValidationError::InvalidTemperature { .. }))
        ));
    }

    #[test]
    fn test_load_validated_applies_key_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("STRATEGIC_ANALYST__AI__API_KEY", "sk-or-v1-env");
        let result = AppConfig::load_validated(Some("sk-or-v1-flag".to_string()));
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.ai.api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("sk-or-v1-flag")
        );
    }

    #[test]
    fn test_debug_does_not_leak_api_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("STRATEGIC_ANALYST__AI__API_KEY", "sk-or-v1-hidden");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(!format!("{:?}", config).contains("sk-or-v1-hidden"));
    }
}
