//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports. Every
//! handler receives the [`AnalystSession`] it acts on; there is no shared
//! mutable state between sessions.

pub mod analysis;
pub mod connection;
pub mod consultant;
pub mod documents;

pub use analysis::{
    AnalysisError, AnalysisObserver, NoopObserver, RunAnalysisCommand, RunAnalysisHandler,
};
pub use connection::{CheckConnectionHandler, MISSING_KEY_MESSAGE};
pub use consultant::{
    ConsultantError, ResolvePendingHandler, SubmitMessageCommand, SubmitMessageHandler,
};
pub use documents::LoadDocumentHandler;

use crate::domain::session::AnalystSession;
use crate::ports::Endpoint;

/// Endpoint for the session's credential and model, if a credential is set.
pub(crate) fn session_endpoint(session: &AnalystSession, base_url: &str) -> Option<Endpoint> {
    session
        .credential()
        .map(|key| Endpoint::new(base_url, session.model(), key.clone()))
}
