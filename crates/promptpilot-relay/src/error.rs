use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

/// Errors that can occur while relaying a completion
#[derive(Debug, Error)]
pub enum RelayError {
    /// Client sent a malformed or empty request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream completion service failed before streaming started
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Error while consuming the upstream event stream
    #[error("streaming error: {0}")]
    Streaming(String),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl RelayError {
    /// HTTP status this error maps to
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Streaming(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short diagnostic safe to show the caller
    pub fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        // Plain-text diagnostics, no JSON envelope
        (self.status_code(), self.client_message()).into_response()
    }
}
