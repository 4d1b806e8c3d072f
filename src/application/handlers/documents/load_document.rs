//! LoadDocument handler - turns uploads into theses or chat context.
//!
//! Ingestion failures never abort the interactive flow: they are logged and
//! degrade to an empty result.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::session::AnalystSession;
use crate::ports::{DocumentReader, UploadedDocument};

pub struct LoadDocumentHandler<R: DocumentReader> {
    reader: Arc<R>,
    max_context_chars: usize,
}

impl<R: DocumentReader> LoadDocumentHandler<R> {
    pub fn new(reader: Arc<R>, max_context_chars: usize) -> Self {
        Self {
            reader,
            max_context_chars,
        }
    }

    /// Batch input from the document; empty when it cannot be read.
    pub fn load_theses(&self, document: &UploadedDocument) -> Vec<String> {
        match self.reader.read_theses(document) {
            Ok(theses) => {
                info!(file = %document.name, count = theses.len(), "Theses loaded");
                theses
            }
            Err(e) => {
                warn!(file = %document.name, error = %e, "Could not read theses");
                Vec::new()
            }
        }
    }

    /// Attaches the document text to the session as chat context.
    ///
    /// Returns the number of characters attached. An unreadable or empty
    /// document detaches any previous context and returns zero.
    pub fn attach_context(&self, session: &mut AnalystSession, document: &UploadedDocument) -> usize {
        let text = match self.reader.read_context(document, self.max_context_chars) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %document.name, error = %e, "Could not read context");
                String::new()
            }
        };
        let chars = text.chars().count();
        info!(session_id = %session.id(), file = %document.name, chars, "Context attached");
        session.attach_context(text);
        chars
    }
}
