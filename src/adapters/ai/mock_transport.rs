//! Mock chat transport for testing.
//!
//! Replays scripted [`RequestOutcome`]s in order and records every request,
//! so retry and pipeline behaviour can be verified without a network.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockChatTransport::new()
//!     .with_status(429)
//!     .with_success("ВЕРДИКТ: Продвигать");
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{ChatTransport, CompletionRequest, Endpoint, RequestOutcome};

/// Text returned once the script is exhausted.
pub const DEFAULT_MOCK_REPLY: &str = "Mock response";

/// A request observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub model: String,
    pub request: CompletionRequest,
    pub timeout: Duration,
}

/// Scripted transport. Clones share the script and the call log.
#[derive(Debug, Clone, Default)]
pub struct MockChatTransport {
    outcomes: Arc<Mutex<VecDeque<RequestOutcome>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockChatTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an outcome.
    pub fn with_outcome(self, outcome: RequestOutcome) -> Self {
        lock(&self.outcomes).push_back(outcome);
        self
    }

    /// Queues a successful reply.
    pub fn with_success(self, text: impl Into<String>) -> Self {
        self.with_outcome(RequestOutcome::Success { text: text.into() })
    }

    /// Queues the outcome a real server would produce for `status`.
    pub fn with_status(self, status: u16) -> Self {
        let outcome = match status {
            200 => RequestOutcome::Success {
                text: DEFAULT_MOCK_REPLY.to_string(),
            },
            401 => RequestOutcome::AuthError,
            429 => RequestOutcome::RateLimited,
            other => RequestOutcome::ServerError {
                status: other,
                body: format!("status {}", other),
            },
        };
        self.with_outcome(outcome)
    }

    /// Every request seen so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        lock(&self.outcomes).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl ChatTransport for MockChatTransport {
    async fn send(
        &self,
        endpoint: &Endpoint,
        request: &CompletionRequest,
        timeout: Duration,
    ) -> RequestOutcome {
        lock(&self.calls).push(RecordedCall {
            model: endpoint.model().to_string(),
            request: request.clone(),
            timeout,
        });
        lock(&self.outcomes)
            .pop_front()
            .unwrap_or_else(|| RequestOutcome::Success {
                text: DEFAULT_MOCK_REPLY.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn endpoint() -> Endpoint {
        Endpoint::new("http://mock", "mock-model", Secret::new("key".to_string()))
    }

    #[tokio::test]
    async fn replays_script_then_defaults() {
        let transport = MockChatTransport::new().with_status(429).with_success("done");
        let request = CompletionRequest::single_shot("sys", "q");

        let first = transport.send(&endpoint(), &request, Duration::from_secs(1)).await;
        let second = transport.send(&endpoint(), &request, Duration::from_secs(1)).await;
        let third = transport.send(&endpoint(), &request, Duration::from_secs(1)).await;

        assert_eq!(first, RequestOutcome::RateLimited);
        assert_eq!(second, RequestOutcome::Success { text: "done".into() });
        assert_eq!(third, RequestOutcome::Success { text: DEFAULT_MOCK_REPLY.into() });
    }

    #[tokio::test]
    async fn records_calls_across_clones() {
        let transport = MockChatTransport::new();
        let clone = transport.clone();
        let request = CompletionRequest::single_shot("sys", "q");

        clone.send(&endpoint(), &request, Duration::from_secs(7)).await;

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "mock-model");
        assert_eq!(calls[0].timeout, Duration::from_secs(7));
        assert_eq!(calls[0].request, request);
    }

    #[test]
    fn with_status_maps_like_a_server() {
        let transport = MockChatTransport::new().with_status(401).with_status(503);
        assert_eq!(transport.remaining(), 2);
    }
}
