//! Uploaded document handling.

mod load_document;

pub use load_document::LoadDocumentHandler;
