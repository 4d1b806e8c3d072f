//! OpenRouter Transport - single-attempt HTTP client for chat completions.
//!
//! Speaks the OpenAI-compatible `/chat/completions` wire format used by
//! OpenRouter. One call to [`ChatTransport::send`] is one POST; retries are
//! the caller's concern.
//!
//! # Status classification
//!
//! | Response                  | Outcome                          |
//! |---------------------------|----------------------------------|
//! | 200                       | `Success` (`choices[0].message.content`, trimmed) |
//! | 401                       | `AuthError`                      |
//! | 429                       | `RateLimited`                    |
//! | any other status          | `ServerError` (body truncated to 300 chars) |
//! | client timeout            | `Timeout`                        |
//! | connect / other I/O error | `NetworkError`                   |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::foundation::truncate_chars;
use crate::ports::{ChatTransport, CompletionRequest, Endpoint, RequestOutcome, WireMessage};

/// Maximum characters of an error body kept as a diagnostic.
pub const ERROR_BODY_MAX_CHARS: usize = 300;

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct OpenRouterTransport {
    client: Client,
}

impl OpenRouterTransport {
    /// Creates a transport with a fresh connection pool.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// Creates a transport around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatTransport for OpenRouterTransport {
    async fn send(
        &self,
        endpoint: &Endpoint,
        request: &CompletionRequest,
        timeout: Duration,
    ) -> RequestOutcome {
        let body = WireRequest {
            model: endpoint.model(),
            messages: request.wire_messages(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(
            model = endpoint.model(),
            messages = body.messages.len(),
            max_tokens = request.max_tokens,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(endpoint.completions_url())
            .bearer_auth(endpoint.expose_api_key())
            .timeout(timeout)
            .json(&body)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => return classify_send_error(&e),
        };

        let status = response.status();
        match response.text().await {
            Ok(text) => classify_response(status, &text),
            Err(e) => classify_send_error(&e),
        }
    }
}

fn classify_send_error(error: &reqwest::Error) -> RequestOutcome {
    if error.is_timeout() {
        RequestOutcome::Timeout
    } else {
        RequestOutcome::NetworkError {
            detail: error.to_string(),
        }
    }
}

/// Maps an HTTP status and body to an outcome.
///
/// A 200 whose body is not the expected JSON still counts as success with
/// empty text; the status code is the contract.
pub fn classify_response(status: StatusCode, body: &str) -> RequestOutcome {
    match status.as_u16() {
        200 => RequestOutcome::Success {
            text: extract_content(body),
        },
        401 => RequestOutcome::AuthError,
        429 => RequestOutcome::RateLimited,
        other => RequestOutcome::ServerError {
            status: other,
            body: truncate_chars(body, ERROR_BODY_MAX_CHARS),
        },
    }
}

fn extract_content(body: &str) -> String {
    match serde_json::from_str::<WireResponse>(body) {
        Ok(response) => response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "Completion body is not valid JSON");
            String::new()
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: Option<WireReply>,
}

#[derive(Debug, Deserialize)]
struct WireReply {
    content: Option<String>,
}
