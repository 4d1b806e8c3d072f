//! Chat Client - retrying completion client over a [`ChatTransport`].
//!
//! # Retry policy
//!
//! - Up to `max_attempts` attempts (3 by default).
//! - Retries on rate limiting, timeouts and network failures.
//! - Invalid credentials and unexpected statuses return immediately.
//! - Backoff starts at `initial_backoff` and doubles after each retryable
//!   failure. There is no pause after the final attempt, so the default
//!   worst case is `30 + 1 + 30 + 2 + 30` seconds.
//! - When every attempt fails the last transient outcome is returned.
//!
//! The probe is a single attempt with its own short timeout.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::sleeper::TokioSleeper;
use crate::config::AiConfig;
use crate::domain::conversation::ChatMessage;
use crate::ports::{
    ChatCompletion, ChatTransport, CompletionRequest, Endpoint, RequestOutcome, Sleeper,
};

/// Prompt sent by the connectivity probe.
pub const PROBE_PROMPT: &str = "Ответь одним словом: OK";

/// Token budget for the connectivity probe.
pub const PROBE_MAX_TOKENS: u32 = 10;

/// Retry and timeout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatClientConfig {
    /// Total attempts per completion, including the first.
    pub max_attempts: u32,
    /// Pause before the second attempt.
    pub initial_backoff: Duration,
    /// Per-attempt timeout for completions.
    pub request_timeout: Duration,
    /// Timeout for the probe.
    pub probe_timeout: Duration,
}

impl ChatClientConfig {
    pub fn from_ai_config(config: &AiConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_backoff: config.initial_backoff(),
            request_timeout: config.timeout(),
            probe_timeout: config.probe_timeout(),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}

impl Default for ChatClientConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            request_timeout: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(15),
        }
    }
}

/// Completion client with bounded retry.
#[derive(Debug, Clone)]
pub struct ChatClient<T, S = TokioSleeper> {
    transport: T,
    sleeper: S,
    config: ChatClientConfig,
}

impl<T: ChatTransport> ChatClient<T, TokioSleeper> {
    /// Creates a client that pauses on the tokio timer.
    pub fn new(transport: T, config: ChatClientConfig) -> Self {
        Self::with_sleeper(transport, TokioSleeper, config)
    }
}

impl<T: ChatTransport, S: Sleeper> ChatClient<T, S> {
    pub fn with_sleeper(transport: T, sleeper: S, config: ChatClientConfig) -> Self {
        Self {
            transport,
            sleeper,
            config,
        }
    }

    pub fn config(&self) -> &ChatClientConfig {
        &self.config
    }
}

#[async_trait]
impl<T: ChatTransport, S: Sleeper> ChatCompletion for ChatClient<T, S> {
    async fn complete(&self, endpoint: &Endpoint, request: CompletionRequest) -> RequestOutcome {
        let mut delay = self.config.initial_backoff;
        let mut last_failure: Option<RequestOutcome> = None;

        for attempt in 1..=self.config.max_attempts {
            let outcome = self
                .transport
                .send(endpoint, &request, self.config.request_timeout)
                .await;

            if !outcome.is_retryable() {
                debug!(attempt, success = outcome.is_success(), "Completion settled");
                return outcome;
            }

            warn!(
                attempt,
                max_attempts = self.config.max_attempts,
                outcome = ?outcome,
                "Transient completion failure"
            );
            last_failure = Some(outcome);

            if attempt < self.config.max_attempts {
                self.sleeper.sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
        }

        last_failure.unwrap_or_else(RequestOutcome::request_failed)
    }

    async fn probe(&self, endpoint: &Endpoint) -> RequestOutcome {
        let request = CompletionRequest::new(PROBE_MAX_TOKENS, 0.0)
            .with_message(ChatMessage::user(PROBE_PROMPT));
        let outcome = self
            .transport
            .send(endpoint, &request, self.config.probe_timeout)
            .await;
        debug!(success = outcome.is_success(), "Connectivity probe finished");
        outcome
    }
}
