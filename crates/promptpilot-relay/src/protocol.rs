//! `OpenAI` chat completion wire format, trimmed to the fields this relay uses

use serde::{Deserialize, Serialize};

// -- Request types --

/// Chat completion request payload
///
/// Every field except the embedded prompt text and the configured model is a
/// constant set by [`crate::template::build_payload`].
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages (fixed system instruction, then the user prompt)
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus sampling threshold
    pub top_p: f64,
    /// Frequency penalty
    pub frequency_penalty: f64,
    /// Presence penalty
    pub presence_penalty: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Request incremental delivery
    pub stream: bool,
    /// Number of completions
    pub n: u32,
}

/// Message within a completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role
    pub role: String,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_owned(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_owned(),
            content: content.into(),
        }
    }
}

// -- Streaming response types --

/// One parsed SSE chunk from the upstream stream
#[derive(Debug, Deserialize)]
pub struct StreamChunk {
    /// Completion choices (the payload requests `n = 1`)
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

/// A single choice within a stream chunk
#[derive(Debug, Deserialize)]
pub struct StreamChoice {
    /// Incremental update
    #[serde(default)]
    pub delta: StreamDelta,
    /// Reason generation finished (present on the final chunk)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental update within a stream chunk
#[derive(Debug, Default, Deserialize)]
pub struct StreamDelta {
    /// Incremental text content; absent on role-only and finish chunks
    #[serde(default)]
    pub content: Option<String>,
}
