//! Axum route handler for the generate endpoint

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::{Router, routing};
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use http::{StatusCode, header};
use serde::Deserialize;

use crate::error::RelayError;
use crate::state::RelayState;
use crate::template;
use crate::upstream::FragmentStream;

/// Build the relay router
pub fn relay_router(state: RelayState) -> Router {
    Router::new()
        .route("/api/generate", routing::post(generate))
        .with_state(state)
}

/// Inbound request body; `prompt` is the only accepted field
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateRequest {
    /// The prompt to optimize
    pub prompt: String,
}

/// Handle `POST /api/generate`
///
/// Validates the prompt, opens a streaming completion upstream, and answers
/// with a chunked plain-text body of forwarded fragments. Validation failures
/// never reach the upstream service.
async fn generate(
    State(state): State<RelayState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let prompt = match payload {
        Ok(Json(request)) => request.prompt,
        Err(rejection) => {
            return (StatusCode::BAD_REQUEST, format!("invalid request body: {rejection}"))
                .into_response();
        }
    };

    let prompt = prompt.trim();
    if prompt.is_empty() {
        return RelayError::InvalidRequest("no prompt in the request".to_owned()).into_response();
    }

    let request = template::build_payload(state.model(), prompt);

    match state.upstream().stream_completion(&request).await {
        Ok(fragments) => {
            let body = Body::from_stream(ForwardedBody::new(into_body_stream(fragments)));
            (
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                body,
            )
                .into_response()
        }
        Err(error) => error.into_response(),
    }
}

/// Map text fragments to outgoing body frames
///
/// One fragment in, one frame out; nothing is pulled from upstream until the
/// transport polls for the next frame, so a slow client suspends the
/// upstream read instead of growing a buffer.
fn into_body_stream(
    fragments: FragmentStream,
) -> impl Stream<Item = Result<Bytes, axum::Error>> + Send {
    fragments.map(|result| match result {
        Ok(text) => Ok(Bytes::from(text)),
        Err(error) => {
            tracing::warn!(%error, "upstream stream failed mid-flight");
            Err(axum::Error::new(error))
        }
    })
}

/// Body wrapper that observes how the stream ends
///
/// When the client disconnects, hyper drops the body before exhaustion; the
/// drop in turn aborts the upstream connection. This wrapper only records
/// which of the two endings happened.
struct ForwardedBody<S> {
    inner: S,
    finished: bool,
}

impl<S> ForwardedBody<S> {
    const fn new(inner: S) -> Self {
        Self { inner, finished: false }
    }
}

impl<S> Stream for ForwardedBody<S>
where
    S: Stream<Item = Result<Bytes, axum::Error>> + Send + Unpin,
{
    type Item = Result<Bytes, axum::Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let poll = self.inner.poll_next_unpin(cx);
        match &poll {
            Poll::Ready(None | Some(Err(_))) => self.finished = true,
            Poll::Ready(Some(Ok(_))) | Poll::Pending => {}
        }
        poll
    }
}

impl<S> Drop for ForwardedBody<S> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!("client disconnected before stream end; upstream request aborted");
        }
    }
}
