//! Integration tests for the retrying chat client over real HTTP.
//!
//! A local TCP server replays canned status codes so the reqwest transport,
//! status classification and retry policy are exercised together. Backoff
//! pauses are recorded instead of slept.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use secrecy::Secret;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use strategic_analyst::adapters::ai::{
    ChatClient, ChatClientConfig, OpenRouterTransport, RecordingSleeper,
};
use strategic_analyst::ports::{
    ChatCompletion, CompletionRequest, Endpoint, RequestOutcome, TransportError,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

const OK_BODY: &str = r#"{"choices":[{"message":{"role":"assistant","content":"ВЕРДИКТ: Продвигать"}}]}"#;

/// Serves `responses` in order, one per connection, and counts requests.
async fn scripted_server(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            drain_request(&mut socket).await;
            counter.fetch_add(1, Ordering::SeqCst);
            let response = format!(
                "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.ok();
            socket.shutdown().await.ok();
        }
    });

    (base_url, hits)
}

async fn drain_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|l| {
                    l.to_ascii_lowercase()
                        .strip_prefix("content-length:")
                        .and_then(|v| v.trim().parse::<usize>().ok())
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                return;
            }
        }
    }
}

fn client(sleeper: &RecordingSleeper) -> ChatClient<OpenRouterTransport, RecordingSleeper> {
    ChatClient::with_sleeper(
        OpenRouterTransport::new().unwrap(),
        sleeper.clone(),
        ChatClientConfig::default().with_request_timeout(Duration::from_secs(5)),
    )
}

fn endpoint(base_url: &str) -> Endpoint {
    Endpoint::new(base_url, "test-model", Secret::new("sk-or-test".to_string()))
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn rate_limited_twice_then_succeeds_on_third_attempt() {
    let (base_url, hits) = scripted_server(vec![(429, "{}"), (429, "{}"), (200, OK_BODY)]).await;
    let sleeper = RecordingSleeper::new();

    let outcome = client(&sleeper)
        .complete(&endpoint(&base_url), CompletionRequest::single_shot("sys", "thesis"))
        .await;

    assert_eq!(
        outcome,
        RequestOutcome::Success {
            text: "ВЕРДИКТ: Продвигать".to_string()
        }
    );
    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert_eq!(
        sleeper.pauses(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[tokio::test]
async fn invalid_key_is_not_retried() {
    let (base_url, hits) = scripted_server(vec![(401, "{}"), (200, OK_BODY)]).await;
    let sleeper = RecordingSleeper::new();

    let outcome = client(&sleeper)
        .complete(&endpoint(&base_url), CompletionRequest::single_shot("sys", "thesis"))
        .await;

    assert_eq!(outcome.into_result(), Err(TransportError::InvalidCredential));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(sleeper.pauses().is_empty());
}

#[tokio::test]
async fn unexpected_status_surfaces_code_and_body() {
    let (base_url, _hits) = scripted_server(vec![(503, "upstream down")]).await;
    let sleeper = RecordingSleeper::new();

    let outcome = client(&sleeper)
        .complete(&endpoint(&base_url), CompletionRequest::single_shot("sys", "thesis"))
        .await;

    let err = outcome.into_result().unwrap_err();
    assert_eq!(err.to_string(), "Ошибка API: 503 — upstream down");
}

#[tokio::test]
async fn exhausted_rate_limit_is_reported_after_three_attempts() {
    let (base_url, hits) = scripted_server(vec![(429, "{}"), (429, "{}"), (429, "{}")]).await;
    let sleeper = RecordingSleeper::new();

    let outcome = client(&sleeper)
        .complete(&endpoint(&base_url), CompletionRequest::single_shot("sys", "thesis"))
        .await;

    assert_eq!(outcome, RequestOutcome::RateLimited);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert_eq!(sleeper.pauses().len(), 2);
}

#[tokio::test]
async fn probe_succeeds_on_plain_200() {
    let (base_url, hits) = scripted_server(vec![(200, "not even json")]).await;
    let sleeper = RecordingSleeper::new();

    let outcome = client(&sleeper).probe(&endpoint(&base_url)).await;

    assert!(outcome.is_success());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
