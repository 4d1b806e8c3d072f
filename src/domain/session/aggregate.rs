//! Analyst session aggregate.
//!
//! Replaces ambient per-user globals: every handler receives the session it
//! operates on. Nothing here outlives the interactive session.

use secrecy::{ExposeSecret, Secret};

use super::connection::ConnectionStatus;
use crate::domain::analysis::AnalysisBatch;
use crate::domain::conversation::{Consultation, SubmitRejection};
use crate::domain::foundation::SessionId;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "tngtech/deepseek-r1t2-chimera:free";

/// Allow-list of selectable models.
pub const SUPPORTED_MODELS: &[&str] = &[DEFAULT_MODEL];

/// Session-scoped state for one operator.
///
/// # Invariants
///
/// - `credential` is `None` or non-blank
/// - `file_context` is `None` or non-empty
#[derive(Debug, Clone)]
pub struct AnalystSession {
    id: SessionId,
    credential: Option<Secret<String>>,
    model: String,
    short_mode: bool,
    file_context: Option<String>,
    consultation: Consultation,
    last_batch: Option<AnalysisBatch>,
    connection: Option<ConnectionStatus>,
}

impl AnalystSession {
    /// Creates a session with no credential and the default model.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            credential: None,
            model: DEFAULT_MODEL.to_string(),
            short_mode: false,
            file_context: None,
            consultation: Consultation::new(),
            last_batch: None,
            connection: None,
        }
    }

    /// Builder-style credential setter.
    pub fn with_credential(mut self, credential: Option<Secret<String>>) -> Self {
        self.credential = credential.filter(|c| !c.expose_secret().trim().is_empty());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_short_mode(mut self, short_mode: bool) -> Self {
        self.short_mode = short_mode;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn credential(&self) -> Option<&Secret<String>> {
        self.credential.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn short_mode(&self) -> bool {
        self.short_mode
    }

    pub fn file_context(&self) -> Option<&str> {
        self.file_context.as_deref()
    }

    pub fn consultation(&self) -> &Consultation {
        &self.consultation
    }

    pub fn consultation_mut(&mut self) -> &mut Consultation {
        &mut self.consultation
    }

    pub fn last_batch(&self) -> Option<&AnalysisBatch> {
        self.last_batch.as_ref()
    }

    pub fn connection(&self) -> Option<&ConnectionStatus> {
        self.connection.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the credential; blank input clears it.
    pub fn set_credential(&mut self, credential: impl Into<String>) {
        let credential = credential.into();
        self.credential = if credential.trim().is_empty() {
            None
        } else {
            Some(Secret::new(credential))
        };
        self.connection = None;
    }

    pub fn set_short_mode(&mut self, short_mode: bool) {
        self.short_mode = short_mode;
    }

    /// Attaches file text to every following submission; empty text detaches.
    pub fn attach_context(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.file_context = if text.is_empty() { None } else { Some(text) };
    }

    pub fn detach_context(&mut self) {
        self.file_context = None;
    }

    /// Builds the user turn, prefixing the attached file context if any.
    pub fn compose_user_message(&self, input: &str) -> String {
        match &self.file_context {
            Some(context) => format!(
                "Контекст из прикреплённого файла:\n\n{}\n\n---\nВопрос/ситуация:\n{}",
                context, input
            ),
            None => input.to_string(),
        }
    }

    /// Submits operator input to the consultation, applying file context.
    pub fn submit_message(&mut self, input: &str) -> Result<(), SubmitRejection> {
        if input.trim().is_empty() {
            return Err(SubmitRejection::EmptyInput);
        }
        let message = self.compose_user_message(input);
        let credential_present = self.has_credential();
        self.consultation.submit(message, credential_present)
    }

    pub fn clear_conversation(&mut self) {
        self.consultation.clear();
    }

    pub fn store_batch(&mut self, batch: AnalysisBatch) {
        self.last_batch = Some(batch);
    }

    pub fn record_connection(&mut self, status: ConnectionStatus) {
        self.connection = Some(status);
    }
}

impl Default for AnalystSession {
    fn default() -> Self {
        Self::new()
    }
}
