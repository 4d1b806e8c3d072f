//! Document Reader Port - File ingestion interface.
//!
//! Turns an uploaded file into either batch input (one thesis per line,
//! cell or paragraph) or a bounded block of context text for the consultant.
//! Parsing is synchronous; uploads are already in memory.

use std::path::Path;

use thiserror::Error;

/// Uploads larger than this are refused.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Port for reading uploaded documents.
///
/// Implementations return [`IngestError`]; the application layer decides to
/// degrade failures to empty input.
pub trait DocumentReader: Send + Sync {
    /// Ordered, trimmed, non-empty theses from the document.
    fn read_theses(&self, document: &UploadedDocument) -> Result<Vec<String>, IngestError>;

    /// Document text truncated to `max_chars` characters.
    fn read_context(&self, document: &UploadedDocument, max_chars: usize) -> Result<String, IngestError>;
}

/// An uploaded file: its name (for the extension) and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads a file from disk, keeping only its file name.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let bytes = std::fs::read(path).map_err(|e| IngestError::io(e.to_string()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, bytes))
    }

    /// Format detected from the file extension.
    pub fn kind(&self) -> Result<DocumentKind, IngestError> {
        let extension = Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "txt" => Ok(DocumentKind::Text),
            "csv" => Ok(DocumentKind::Csv),
            "xlsx" | "xls" => Ok(DocumentKind::Spreadsheet),
            "docx" => Ok(DocumentKind::Word),
            _ => Err(IngestError::UnsupportedFormat(self.name.clone())),
        }
    }
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Text,
    Csv,
    Spreadsheet,
    Word,
}

/// Errors that can occur while reading an upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("I/O error while reading document: {0}")]
    Io(String),
}

impl IngestError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }

    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }
}

/// Splits pasted text into trimmed, non-empty lines.
pub fn parse_theses_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
