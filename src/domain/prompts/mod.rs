//! Static system prompts.
//!
//! SWOT analysis templates (selected by the operator, optionally replaced by
//! free-form text) and the two consultant prompts.

mod templates;

pub use templates::{
    consultant_prompt, resolve_analysis_prompt, AnalysisTemplate, CONSULTANT_SYSTEM,
    CONSULTANT_SYSTEM_SHORT,
};
