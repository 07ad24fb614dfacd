/// Client-specific result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from the relay client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Relay returned a non-success status
    #[error("{status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Diagnostic body returned by the relay
        message: String,
    },

    /// Stream ended or decoded incorrectly
    #[error("stream error: {0}")]
    Stream(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}
