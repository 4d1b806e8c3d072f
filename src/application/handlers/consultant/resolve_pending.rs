//! ResolvePending handler - second pass of the consultant chat.
//!
//! Sends the conversation (minus the placeholder) with the consultant system
//! prompt for the session's verbosity, then resolves the placeholder. On
//! failure the placeholder and the triggering user turn are both removed.

use std::sync::Arc;

use tracing::{info, warn};

use super::super::session_endpoint;
use super::ConsultantError;
use crate::config::ConsultantConfig;
use crate::domain::prompts::consultant_prompt;
use crate::domain::session::AnalystSession;
use crate::ports::{ChatCompletion, CompletionRequest};

/// Handler that resolves a pending consultant reply.
pub struct ResolvePendingHandler<C: ChatCompletion> {
    client: Arc<C>,
    base_url: String,
    config: ConsultantConfig,
}

impl<C: ChatCompletion> ResolvePendingHandler<C> {
    pub fn new(client: Arc<C>, base_url: impl Into<String>, config: ConsultantConfig) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            config,
        }
    }

    /// Resolves the pending placeholder, if any.
    ///
    /// Returns `Ok(None)` when nothing is pending and `Ok(Some(reply))` once
    /// the reply replaced the placeholder.
    pub async fn handle(
        &self,
        session: &mut AnalystSession,
    ) -> Result<Option<String>, ConsultantError> {
        let history = match session.consultation().pending_history() {
            Some(history) => history.to_vec(),
            None => return Ok(None),
        };

        let endpoint = match session_endpoint(session, &self.base_url) {
            Some(endpoint) => endpoint,
            None => {
                session.consultation_mut().fail()?;
                return Err(ConsultantError::MissingCredential);
            }
        };

        let short_mode = session.short_mode();
        let request = CompletionRequest::conversational(consultant_prompt(short_mode), &history)
            .with_max_tokens(self.config.max_tokens_for(short_mode))
            .with_temperature(self.config.temperature);

        match self.client.complete(&endpoint, request).await.into_result() {
            Ok(reply) => {
                info!(
                    session_id = %session.id(),
                    turns = history.len(),
                    short_mode,
                    "Consultant reply received"
                );
                session.consultation_mut().complete(reply.clone())?;
                Ok(Some(reply))
            }
            Err(e) => {
                warn!(session_id = %session.id(), error = %e, "Consultant request failed");
                session.consultation_mut().fail()?;
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{ChatClient, ChatClientConfig, MockChatTransport, RecordingSleeper};
    use crate::domain::conversation::{ConsultationState, Role};
    use crate::domain::prompts::{CONSULTANT_SYSTEM, CONSULTANT_SYSTEM_SHORT};
    use crate::ports::TransportError;

    type TestClient = ChatClient<MockChatTransport, RecordingSleeper>;

    fn handler(transport: &MockChatTransport) -> ResolvePendingHandler<TestClient> {
        let client = ChatClient::with_sleeper(
            transport.clone(),
            RecordingSleeper::new(),
            ChatClientConfig::default(),
        );
        ResolvePendingHandler::new(Arc::new(client), "http://mock", ConsultantConfig::default())
    }

    fn submitted(input: &str) -> AnalystSession {
        let mut session = AnalystSession::new();
        session.set_credential("key");
        session.submit_message(input).unwrap();
        session
    }

    mod success {
        use super::*;

        #[tokio::test]
        async fn reply_replaces_placeholder() {
            let transport = MockChatTransport::new().with_success("Рекомендую пилот.");
            let mut session = submitted("Запускать продукт?");

            let reply = handler(&transport).handle(&mut session).await.unwrap();

            assert_eq!(reply.as_deref(), Some("Рекомендую пилот."));
            let messages = session.consultation().conversation().messages();
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[1].role(), Role::Assistant);
            assert_eq!(messages[1].content(), "Рекомендую пилот.");
            assert_eq!(session.consultation().state(), ConsultationState::Idle);
        }

        #[tokio::test]
        async fn sends_history_without_placeholder() {
            let transport = MockChatTransport::new().with_success("ok");
            let mut session = submitted("Вопрос");

            handler(&transport).handle(&mut session).await.unwrap();

            let calls = transport.calls();
            let request = &calls[0].request;
            assert_eq!(request.system_prompt.as_deref(), Some(CONSULTANT_SYSTEM));
            assert_eq!(request.messages.len(), 1);
            assert_eq!(request.messages[0].content(), "Вопрос");
            assert_eq!(request.max_tokens, ConsultantConfig::default().max_tokens);
        }

        #[tokio::test]
        async fn short_mode_uses_short_prompt_and_budget() {
            let transport = MockChatTransport::new().with_success("ok");
            let mut session = submitted("Вопрос");
            session.set_short_mode(true);

            handler(&transport).handle(&mut session).await.unwrap();

            let request = &transport.calls()[0].request;
            assert_eq!(request.system_prompt.as_deref(), Some(CONSULTANT_SYSTEM_SHORT));
            assert_eq!(request.max_tokens, ConsultantConfig::default().short_max_tokens);
        }

        #[tokio::test]
        async fn nothing_pending_is_a_no_op() {
            let transport = MockChatTransport::new();
            let mut session = AnalystSession::new();

            let reply = handler(&transport).handle(&mut session).await.unwrap();

            assert!(reply.is_none());
            assert_eq!(transport.call_count(), 0);
        }
    }

    mod failure {
        use super::*;

        #[tokio::test]
        async fn failure_removes_user_turn_and_placeholder() {
            let transport = MockChatTransport::new().with_status(401);
            let mut session = submitted("Вопрос");

            let result = handler(&transport).handle(&mut session).await;

            assert!(matches!(
                result,
                Err(ConsultantError::Transport(TransportError::InvalidCredential))
            ));
            assert!(session.consultation().conversation().is_empty());
            assert_eq!(session.consultation().state(), ConsultationState::Idle);
        }

        #[tokio::test]
        async fn credential_cleared_between_passes_fails_pending_turn() {
            let transport = MockChatTransport::new();
            let mut session = submitted("Вопрос");
            session.set_credential("");

            let result = handler(&transport).handle(&mut session).await;

            assert!(matches!(result, Err(ConsultantError::MissingCredential)));
            assert!(session.consultation().conversation().is_empty());
            assert_eq!(transport.call_count(), 0);
        }

        #[tokio::test]
        async fn earlier_turns_survive_a_failure() {
            let transport = MockChatTransport::new()
                .with_success("first answer")
                .with_status(500);
            let mut session = submitted("first");
            let handler = handler(&transport);
            handler.handle(&mut session).await.unwrap();

            session.submit_message("second").unwrap();
            assert!(handler.handle(&mut session).await.is_err());

            let messages = session.consultation().conversation().messages();
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[1].content(), "first answer");
        }
    }
}
