//! Mock OpenAI-compatible upstream for integration tests
//!
//! Serves `/v1/chat/completions` with scriptable SSE responses and counts
//! every request and every streamed chunk, so tests can assert that
//! validation failures never reach upstream, that order is preserved, and
//! that cancellation and backpressure propagate.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Router, routing};
use bytes::Bytes;
use tokio_util::sync::CancellationToken;

/// How the mock answers streaming completion requests
#[derive(Clone)]
pub enum Mode {
    /// Emit these content chunks in order, then finish and send `[DONE]`
    Chunks(Vec<String>),
    /// Reject every request with this status
    Fail(u16),
    /// Stream the same content chunk forever, pausing `delay_ms` between chunks
    Endless {
        /// Content of every chunk
        chunk: String,
        /// Pause between chunks, in milliseconds
        delay_ms: u64,
    },
}

struct MockState {
    completion_count: AtomicU32,
    chunks_sent: AtomicU64,
    mode: Mode,
}

/// Mock upstream that returns predictable streams
pub struct MockOpenAi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockOpenAi {
    /// Start with the default two-variant response
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with_text("Here you go:\n\n1. First optimized prompt\n\n2. Second optimized prompt\n").await
    }

    /// Start with a response split into small ordered chunks
    pub async fn start_with_text(text: &str) -> anyhow::Result<Self> {
        let chunks = split_into_chunks(text, 7);
        Self::start_with_mode(Mode::Chunks(chunks)).await
    }

    /// Start with exactly these content chunks
    pub async fn start_with_chunks(chunks: &[&str]) -> anyhow::Result<Self> {
        Self::start_with_mode(Mode::Chunks(chunks.iter().map(|&c| c.to_owned()).collect())).await
    }

    /// Start in failing mode
    pub async fn start_failing(status: u16) -> anyhow::Result<Self> {
        Self::start_with_mode(Mode::Fail(status)).await
    }

    /// Start with the given mode
    pub async fn start_with_mode(mode: Mode) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            completion_count: AtomicU32::new(0),
            chunks_sent: AtomicU64::new(0),
            mode,
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the upstream
    ///
    /// Includes `/v1` since the relay appends `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of completion requests received
    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::SeqCst)
    }

    /// Number of streamed chunks pulled off the mock so far
    pub fn chunks_sent(&self) -> u64 {
        self.state.chunks_sent.load(Ordering::SeqCst)
    }
}

impl Drop for MockOpenAi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_chat_completions(State(state): State<Arc<MockState>>) -> Response {
    state.completion_count.fetch_add(1, Ordering::SeqCst);

    match &state.mode {
        Mode::Fail(status) => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, "mock upstream failure").into_response()
        }
        Mode::Chunks(chunks) => {
            let mut body = String::new();
            body.push_str(&sse_event(&role_chunk()));
            for chunk in chunks {
                body.push_str(&sse_event(&content_chunk(chunk)));
            }
            body.push_str(&sse_event(&finish_chunk()));
            body.push_str("data: [DONE]\n\n");

            (
                [(axum::http::header::CONTENT_TYPE, "text/event-stream")],
                body,
            )
                .into_response()
        }
        Mode::Endless { chunk, delay_ms } => {
            let state = Arc::clone(&state);
            let chunk = chunk.clone();
            let delay = Duration::from_millis(*delay_ms);

            let stream = futures_util::stream::unfold(0u64, move |i| {
                let state = Arc::clone(&state);
                let chunk = chunk.clone();
                async move {
                    if delay > Duration::ZERO {
                        tokio::time::sleep(delay).await;
                    }
                    state.chunks_sent.fetch_add(1, Ordering::SeqCst);
                    let frame = sse_event(&content_chunk(&chunk));
                    Some((Ok::<_, std::io::Error>(Bytes::from(frame)), i + 1))
                }
            });

            (
                [(axum::http::header::CONTENT_TYPE, "text/event-stream")],
                Body::from_stream(stream),
            )
                .into_response()
        }
    }
}

/// Wrap chunk JSON in an SSE data frame
fn sse_event(data: &serde_json::Value) -> String {
    format!("data: {data}\n\n")
}

fn role_chunk() -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion.chunk",
        "created": 1_700_000_000u64,
        "model": "gpt-3.5-turbo",
        "choices": [{"index": 0, "delta": {"role": "assistant"}, "finish_reason": null}]
    })
}

fn content_chunk(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion.chunk",
        "created": 1_700_000_000u64,
        "model": "gpt-3.5-turbo",
        "choices": [{"index": 0, "delta": {"content": content}, "finish_reason": null}]
    })
}

fn finish_chunk() -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion.chunk",
        "created": 1_700_000_000u64,
        "model": "gpt-3.5-turbo",
        "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]
    })
}

/// Split text into chunks of roughly `size` characters on char boundaries
fn split_into_chunks(text: &str, size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        current.push(ch);
        if current.chars().count() >= size {
            chunks.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
