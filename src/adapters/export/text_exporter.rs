//! Text-based implementation of ReportExporter.
//!
//! CSV output starts with a UTF-8 BOM so spreadsheet tools pick the right
//! encoding for Cyrillic text. Placeholder turns are never exported.

use chrono::{DateTime, Utc};

use crate::domain::analysis::{AnalysisBatch, AnalysisRecord};
use crate::domain::conversation::{ChatMessage, Conversation};
use crate::ports::{ExportError, ExportFormat, ReportExporter};

/// Column headers of a batch export.
pub const BATCH_HEADERS: [&str; 5] = ["Тезис", "Эффект", "Риски", "Вердикт", "Статус"];

const BOM: &str = "\u{feff}";

/// Exporter producing CSV, Markdown and plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReportExporter {
    /// Fixed timestamp for headers; `None` means "now".
    timestamp: Option<DateTime<Utc>>,
}

impl TextReportExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `timestamp` in export headers instead of the current time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    fn stamp(&self) -> String {
        self.timestamp
            .unwrap_or_else(Utc::now)
            .format("%d.%m.%Y %H:%M")
            .to_string()
    }

    fn batch_csv(&self, batch: &AnalysisBatch) -> Result<String, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(BATCH_HEADERS)
            .map_err(|e| ExportError::serialization(e.to_string()))?;
        for record in batch.records() {
            writer
                .write_record(row(record))
                .map_err(|e| ExportError::serialization(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::serialization(e.to_string()))?;
        let body = String::from_utf8(bytes).map_err(|e| ExportError::serialization(e.to_string()))?;
        Ok(format!("{}{}", BOM, body))
    }

    fn batch_markdown(&self, batch: &AnalysisBatch) -> String {
        let mut lines = Vec::with_capacity(batch.len() + 2);
        lines.push(markdown_row(BATCH_HEADERS.iter().copied()));
        lines.push(format!("|{}|", vec!["---"; BATCH_HEADERS.len()].join("|")));
        for record in batch.records() {
            lines.push(markdown_row(row(record).into_iter()));
        }
        lines.join("\n")
    }

    fn conversation_text(&self, conversation: &Conversation) -> String {
        exported_turns(conversation)
            .map(|m| format!("{}:\n{}\n", speaker(m), m.content()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn conversation_markdown(&self, conversation: &Conversation) -> String {
        let mut lines = vec![
            "# Экспорт диалога\n".to_string(),
            format!("*{}*\n", self.stamp()),
        ];
        for message in exported_turns(conversation) {
            lines.push(format!(
                "**{}**\n\n{}\n\n---\n",
                speaker(message),
                message.content().replace('\n', "\n\n")
            ));
        }
        lines.join("\n")
    }
}

impl ReportExporter for TextReportExporter {
    fn export_batch(&self, batch: &AnalysisBatch, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => self.batch_csv(batch),
            ExportFormat::Markdown => Ok(self.batch_markdown(batch)),
            ExportFormat::Text => Err(ExportError::FormatNotApplicable {
                format,
                target: "analysis batch",
            }),
        }
    }

    fn export_conversation(
        &self,
        conversation: &Conversation,
        format: ExportFormat,
    ) -> Result<String, ExportError> {
        match format {
            ExportFormat::Text => Ok(self.conversation_text(conversation)),
            ExportFormat::Markdown => Ok(self.conversation_markdown(conversation)),
            ExportFormat::Csv => Err(ExportError::FormatNotApplicable {
                format,
                target: "conversation",
            }),
        }
    }
}

fn row(record: &AnalysisRecord) -> [&str; 5] {
    [
        &record.thesis,
        &record.effect,
        &record.risks,
        &record.verdict,
        record.status.label(),
    ]
}

fn markdown_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let cells: Vec<String> = cells
        .map(|c| c.replace('|', "\\|").replace('\n', " "))
        .collect();
    format!("| {} |", cells.join(" | "))
}

fn exported_turns(conversation: &Conversation) -> impl Iterator<Item = &ChatMessage> {
    conversation.messages().iter().filter(|m| !m.is_placeholder())
}

fn speaker(message: &ChatMessage) -> &'static str {
    if message.is_user() {
        "Вы"
    } else {
        "Аналитик"
    }
}
