//! Chat Completion Port - Interface for the remote chat-completion API.
//!
//! Two layers are exposed so retry policy stays testable without a network:
//!
//! - [`ChatTransport`] performs exactly one HTTP attempt and classifies it
//!   into a [`RequestOutcome`].
//! - [`ChatCompletion`] is what handlers depend on: `complete` folds up to
//!   N transport attempts into one outcome, `probe` performs a single
//!   credential check.
//!
//! Neither layer returns `Err` across its boundary. Callers turn the outcome
//! into a `Result` with [`RequestOutcome::into_result`] when they need `?`.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use thiserror::Error;

use crate::domain::conversation::{ChatMessage, Role};

/// Default OpenRouter-compatible API root.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Detail used when every attempt failed without a specific error.
pub const REQUEST_FAILED_DETAIL: &str = "Не удалось выполнить запрос";

/// Where and as whom a request is sent.
#[derive(Clone)]
pub struct Endpoint {
    base_url: String,
    model: String,
    api_key: Secret<String>,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Secret<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        }
    }

    /// Full URL of the chat-completions resource.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Bearer token, trimmed. Only the transport should call this.
    pub fn expose_api_key(&self) -> &str {
        self.api_key.expose_secret().trim()
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Request for a chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Conversation turns after the system prompt.
    pub messages: Vec<ChatMessage>,
    /// System prompt prepended to `messages` on the wire.
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    /// Creates an empty request with the given budget and temperature.
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            max_tokens,
            temperature,
        }
    }

    /// System prompt plus a single user message.
    pub fn single_shot(system_prompt: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self::new(1000, 0.7)
            .with_system_prompt(system_prompt)
            .with_message(ChatMessage::user(user_message))
    }

    /// System prompt plus caller-supplied history.
    pub fn conversational(system_prompt: impl Into<String>, history: &[ChatMessage]) -> Self {
        let mut request = Self::new(1000, 0.7).with_system_prompt(system_prompt);
        request.messages.extend_from_slice(history);
        request
    }

    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = temp;
        self
    }

    /// Messages in submission order, system prompt first.
    pub fn wire_messages(&self) -> Vec<WireMessage<'_>> {
        let system = self.system_prompt.as_deref().map(|content| WireMessage {
            role: Role::System.as_str(),
            content,
        });
        system
            .into_iter()
            .chain(self.messages.iter().map(|m| WireMessage {
                role: m.role().as_str(),
                content: m.content(),
            }))
            .collect()
    }
}

/// `{role, content}` as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WireMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Classified result of one transport attempt, or of a folded retry loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Success { text: String },
    AuthError,
    RateLimited,
    Timeout,
    NetworkError { detail: String },
    ServerError { status: u16, body: String },
}

impl RequestOutcome {
    /// Outcome used when the retry loop ends with nothing specific recorded.
    pub fn request_failed() -> Self {
        RequestOutcome::NetworkError {
            detail: REQUEST_FAILED_DETAIL.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success { .. })
    }

    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RequestOutcome::RateLimited
                | RequestOutcome::Timeout
                | RequestOutcome::NetworkError { .. }
        )
    }

    /// Converts into a `Result`, mapping failures to [`TransportError`].
    pub fn into_result(self) -> Result<String, TransportError> {
        match self {
            RequestOutcome::Success { text } => Ok(text),
            RequestOutcome::AuthError => Err(TransportError::InvalidCredential),
            RequestOutcome::RateLimited => Err(TransportError::RateLimited),
            RequestOutcome::Timeout => Err(TransportError::Timeout),
            RequestOutcome::NetworkError { detail } => Err(TransportError::NetworkFailure(detail)),
            RequestOutcome::ServerError { status, body } => {
                Err(TransportError::UnexpectedStatus { status, body })
            }
        }
    }
}

/// Failure surfaced to the operator after retries are settled.
///
/// Messages are operator-facing and shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Неверный API ключ")]
    InvalidCredential,

    #[error("Превышен лимит запросов. Попробуйте позже.")]
    RateLimited,

    #[error("Таймаут запроса")]
    Timeout,

    #[error("{0}")]
    NetworkFailure(String),

    #[error("Ошибка API: {status} — {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// One HTTP attempt against the chat-completions endpoint.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends `request` once with the given timeout and classifies the result.
    async fn send(
        &self,
        endpoint: &Endpoint,
        request: &CompletionRequest,
        timeout: Duration,
    ) -> RequestOutcome;
}

/// Pause between retry attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Completion client used by the application layer.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Completes `request` with bounded retry and backoff.
    async fn complete(&self, endpoint: &Endpoint, request: CompletionRequest) -> RequestOutcome;

    /// Single-attempt credential and connectivity check.
    async fn probe(&self, endpoint: &Endpoint) -> RequestOutcome;
}
