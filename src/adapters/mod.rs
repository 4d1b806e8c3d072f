//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Chat-completion transport and retrying client
//! - `document` - Uploaded file ingestion
//! - `export` - Text serialization of batches and conversations

pub mod ai;
pub mod document;
pub mod export;

pub use ai::{ChatClient, ChatClientConfig, MockChatTransport, OpenRouterTransport, TokioSleeper};
pub use document::FileDocumentReader;
pub use export::TextReportExporter;
