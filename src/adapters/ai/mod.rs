//! Chat-completion adapters.
//!
//! ## Available Adapters
//!
//! - `OpenRouterTransport` - reqwest transport for the OpenRouter API
//! - `MockChatTransport` - Scripted transport for testing
//! - `ChatClient` - Retry/backoff client implementing `ChatCompletion`
//! - `TokioSleeper` / `RecordingSleeper` - Backoff pauses (real / recorded)

mod chat_client;
mod mock_transport;
mod openrouter_transport;
mod sleeper;

pub use chat_client::{ChatClient, ChatClientConfig, PROBE_MAX_TOKENS, PROBE_PROMPT};
pub use mock_transport::{MockChatTransport, RecordedCall, DEFAULT_MOCK_REPLY};
pub use openrouter_transport::{classify_response, OpenRouterTransport, ERROR_BODY_MAX_CHARS};
pub use sleeper::{RecordingSleeper, TokioSleeper};
