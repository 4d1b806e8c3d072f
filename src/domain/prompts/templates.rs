//! Prompt texts and template selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Selectable SWOT analysis prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisTemplate {
    /// Balanced strategic review.
    #[default]
    Standard,
    /// Emphasis on financial return and payback.
    Investment,
    /// One-line answers per field for large lists.
    Quick,
}

impl AnalysisTemplate {
    pub fn all() -> &'static [AnalysisTemplate] {
        &[
            AnalysisTemplate::Standard,
            AnalysisTemplate::Investment,
            AnalysisTemplate::Quick,
        ]
    }

    /// Operator-facing name.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisTemplate::Standard => "Стандартный SWOT",
            AnalysisTemplate::Investment => "Инвестиционный фокус",
            AnalysisTemplate::Quick => "Быстрая оценка",
        }
    }

    /// System prompt sent with every thesis in the batch.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            AnalysisTemplate::Standard => SWOT_STANDARD,
            AnalysisTemplate::Investment => SWOT_INVESTMENT,
            AnalysisTemplate::Quick => SWOT_QUICK,
        }
    }

    fn key(&self) -> &'static str {
        match self {
            AnalysisTemplate::Standard => "standard",
            AnalysisTemplate::Investment => "investment",
            AnalysisTemplate::Quick => "quick",
        }
    }
}

impl fmt::Display for AnalysisTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for AnalysisTemplate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(AnalysisTemplate::Standard),
            "investment" => Ok(AnalysisTemplate::Investment),
            "quick" => Ok(AnalysisTemplate::Quick),
            other => Err(ValidationError::invalid_format(
                "template",
                format!("unknown template '{}'", other),
            )),
        }
    }
}

/// Returns the override text when it has content, else the template prompt.
pub fn resolve_analysis_prompt(template: AnalysisTemplate, custom: Option<&str>) -> String {
    match custom.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => template.system_prompt().to_string(),
    }
}

/// Consultant prompt for the given verbosity.
pub fn consultant_prompt(short_mode: bool) -> &'static str {
    if short_mode {
        CONSULTANT_SYSTEM_SHORT
    } else {
        CONSULTANT_SYSTEM
    }
}

// ============================================================================
// SWOT Templates
// ============================================================================

const SWOT_STANDARD: &str = r#"Ты - опытный стратегический аналитик. Тебе дают одно предложение (тезис) по развитию бизнеса.
Проведи краткий SWOT-анализ и ответь строго в формате:

ТЕЗИС: <тезис в одной фразе>
ЭФФЕКТ: <ожидаемый эффект: сильные стороны и возможности>
РИСКИ: <слабые стороны и угрозы>
ВЕРДИКТ: <одно из: Продвигать, Доработать, Отклонить> - <краткое обоснование>

Не добавляй вступлений и заключений. Отвечай на русском языке."#;

const SWOT_INVESTMENT: &str = r#"Ты - инвестиционный аналитик. Оцени предложение с точки зрения вложений, окупаемости и влияния на выручку.
Ответь строго в формате:

ТЕЗИС: <тезис в одной фразе>
ЭФФЕКТ: <финансовый эффект, срок окупаемости, рост выручки или экономия>
РИСКИ: <финансовые и операционные риски, необходимые вложения>
ВЕРДИКТ: <одно из: Продвигать, Доработать, Отклонить> - <краткое обоснование>

Не добавляй вступлений и заключений. Отвечай на русском языке."#;

const SWOT_QUICK: &str = r#"Ты - стратегический аналитик. Дай очень краткую оценку предложения, не более одного предложения на поле.
Формат ответа:

ТЕЗИС: <тезис>
ЭФФЕКТ: <главный эффект>
РИСКИ: <главный риск>
ВЕРДИКТ: <Продвигать, Доработать или Отклонить> - <пара слов>"#;

// ============================================================================
// Consultant Prompts
// ============================================================================

/// Long-form consultant prompt.
pub const CONSULTANT_SYSTEM: &str = r#"Ты - стратегический консультант для руководителей. Пользователь описывает ситуацию, проблему или идею.
Разбери её по существу:
- выдели ключевую проблему и её причины;
- предложи два-три варианта действий с плюсами и минусами;
- оцени риски и что нужно проверить в первую очередь;
- закончи конкретной рекомендацией и первыми шагами.

Если пользователь приложил файл, опирайся на его содержимое. Задавай уточняющие вопросы, если данных недостаточно. Отвечай на русском языке."#;

/// Short-form consultant prompt.
pub const CONSULTANT_SYSTEM_SHORT: &str = r#"Ты - стратегический консультант. Отвечай кратко: не более пяти пунктов, без вступлений.
Назови главную проблему, лучший вариант действий и основной риск. Отвечай на русском языке."#;
