//! Report Exporter Port - Serialization of finished results.
//!
//! Consumes an [`AnalysisBatch`] or a [`Conversation`] and renders it as
//! text. Nothing flows back into the core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::analysis::AnalysisBatch;
use crate::domain::conversation::Conversation;

/// Port for exporting results.
pub trait ReportExporter: Send + Sync {
    /// Renders a batch. Supports `Csv` and `Markdown`.
    fn export_batch(&self, batch: &AnalysisBatch, format: ExportFormat) -> Result<String, ExportError>;

    /// Renders a conversation. Supports `Text` and `Markdown`.
    fn export_conversation(
        &self,
        conversation: &Conversation,
        format: ExportFormat,
    ) -> Result<String, ExportError>;
}

/// Export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Comma-separated values with a UTF-8 BOM.
    Csv,
    /// Markdown.
    Markdown,
    /// Plain text.
    Text,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// Unknown format name.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Format exists but does not apply to this kind of content.
    #[error("Format {format} is not available for {target}")]
    FormatNotApplicable { format: ExportFormat, target: &'static str },

    /// Serializer failure.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl ExportError {
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization(reason.into())
    }
}
