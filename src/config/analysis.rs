//! Batch analysis configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::prompts::{resolve_analysis_prompt, AnalysisTemplate};

/// Batch analysis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Prompt template used when no custom prompt is set
    #[serde(default)]
    pub template: AnalysisTemplate,

    /// Free-form system prompt overriding the template
    pub custom_prompt: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Token budget per thesis
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl AnalysisConfig {
    /// System prompt in effect.
    pub fn system_prompt(&self) -> String {
        resolve_analysis_prompt(self.template, self.custom_prompt.as_deref())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidTokenBudget("analysis"));
        }
        super::validate_temperature("analysis", self.temperature)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            template: AnalysisTemplate::default(),
            custom_prompt: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_temperature() -> f32 {
    0.5
}

fn default_max_tokens() -> u32 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.template, AnalysisTemplate::Standard);
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.max_tokens, 600);
        assert_eq!(config.system_prompt(), AnalysisTemplate::Standard.system_prompt());
    }

    #[test]
    fn test_custom_prompt_overrides_template() {
        let config = AnalysisConfig {
            custom_prompt: Some("Оцени тезис".to_string()),
            ..Default::default()
        };
        assert_eq!(config.system_prompt(), "Оцени тезис");
    }

    #[test]
    fn test_zero_budget_rejected() {
        let config = AnalysisConfig {
            max_tokens: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTokenBudget("analysis"))
        );
    }
}
