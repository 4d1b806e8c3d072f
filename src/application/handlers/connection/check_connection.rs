//! CheckConnection handler - validates the session credential.
//!
//! Sends the single-attempt probe and records a [`ConnectionStatus`] on the
//! session. Success means HTTP 200; the reply text is ignored.

use std::sync::Arc;

use tracing::info;

use super::super::session_endpoint;
use crate::domain::foundation::truncate_chars;
use crate::domain::session::{AnalystSession, ConnectionStatus};
use crate::ports::{ChatCompletion, RequestOutcome};

/// Reason shown when no credential is set.
pub const MISSING_KEY_MESSAGE: &str = "Введите API ключ";

/// Characters of an unexpected error body shown after a failed probe.
const PROBE_BODY_MAX_CHARS: usize = 200;

/// Handler for the connection check.
pub struct CheckConnectionHandler<C: ChatCompletion> {
    client: Arc<C>,
    base_url: String,
}

impl<C: ChatCompletion> CheckConnectionHandler<C> {
    pub fn new(client: Arc<C>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Probes the API and stores the result on the session.
    pub async fn handle(&self, session: &mut AnalystSession) -> ConnectionStatus {
        let status = match session_endpoint(session, &self.base_url) {
            None => ConnectionStatus::Failed {
                reason: MISSING_KEY_MESSAGE.to_string(),
            },
            Some(endpoint) => status_from(self.client.probe(&endpoint).await),
        };

        info!(
            session_id = %session.id(),
            connected = status.is_connected(),
            "Connection check finished"
        );
        session.record_connection(status.clone());
        status
    }
}

fn status_from(outcome: RequestOutcome) -> ConnectionStatus {
    let reason = match outcome {
        RequestOutcome::Success { .. } => return ConnectionStatus::Connected,
        RequestOutcome::AuthError => "Неверный API ключ".to_string(),
        RequestOutcome::RateLimited => "Превышен лимит запросов. Попробуйте позже.".to_string(),
        RequestOutcome::Timeout => "Таймаут. Проверьте интернет и повторите.".to_string(),
        RequestOutcome::NetworkError { detail } => format!("Ошибка сети: {}", detail),
        RequestOutcome::ServerError { status, body } => format!(
            "Ошибка API: {} — {}",
            status,
            truncate_chars(&body, PROBE_BODY_MAX_CHARS)
        ),
    };
    ConnectionStatus::Failed { reason }
}
