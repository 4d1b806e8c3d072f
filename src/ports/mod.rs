//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ChatTransport` / `ChatCompletion` / `Sleeper` - Chat-completion API access
//! - `DocumentReader` - Uploaded file ingestion
//! - `ReportExporter` - Text serialization of batches and conversations

mod ai_provider;
mod document_reader;
mod report_exporter;

pub use ai_provider::{
    ChatCompletion, ChatTransport, CompletionRequest, Endpoint, RequestOutcome, Sleeper,
    TransportError, WireMessage, DEFAULT_BASE_URL, REQUEST_FAILED_DETAIL,
};
pub use document_reader::{
    parse_theses_from_text, DocumentKind, DocumentReader, IngestError, UploadedDocument,
    MAX_UPLOAD_BYTES,
};
pub use report_exporter::{ExportError, ExportFormat, ReportExporter};
