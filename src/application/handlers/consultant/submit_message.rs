//! SubmitMessage handler - first pass of the consultant chat.

use tracing::{debug, warn};

use super::ConsultantError;
use crate::domain::session::AnalystSession;

/// Operator input for the consultant.
#[derive(Debug, Clone)]
pub struct SubmitMessageCommand {
    pub content: String,
}

impl SubmitMessageCommand {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Appends the user turn and the placeholder. No network call happens here.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitMessageHandler;

impl SubmitMessageHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        session: &mut AnalystSession,
        cmd: SubmitMessageCommand,
    ) -> Result<(), ConsultantError> {
        match session.submit_message(&cmd.content) {
            Ok(()) => {
                debug!(
                    session_id = %session.id(),
                    with_context = session.file_context().is_some(),
                    "Message submitted, completion pending"
                );
                Ok(())
            }
            Err(rejection) => {
                warn!(session_id = %session.id(), reason = %rejection, "Message rejected");
                Err(rejection.into())
            }
        }
    }
}
