use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use url::Url;

use crate::decode::StreamDecoder;
use crate::entries::split_entries;
use crate::error::{ClientError, Result};

/// Controller phase for one submission
///
/// `Idle` and `Submitting` are transited inside [`RelayClient::optimize`];
/// a successfully opened session starts in `Streaming`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No submission in flight
    Idle,
    /// Request sent, response head not yet received
    Submitting,
    /// Consuming body fragments
    Streaming,
    /// Stream exhausted cleanly
    Done,
    /// Submission or stream failed; the session is dead
    Error,
}

/// Typed client for the promptpilot relay
#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: Url,
    http: reqwest::Client,
}

impl RelayClient {
    /// Create a new client pointing at the given base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL: {e}")))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Submit a prompt for optimization
    ///
    /// Covers `Idle -> Submitting -> Streaming`: sends the request and waits
    /// for the response head. A non-success status or transport failure ends
    /// the submission in `Error` with no session to consume.
    pub async fn optimize(&self, prompt: &str) -> Result<OptimizeSession> {
        let url = self
            .base_url
            .join("api/generate")
            .map_err(|e| ClientError::Config(format!("invalid endpoint URL: {e}")))?;

        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(OptimizeSession {
            stream: Box::pin(response.bytes_stream()),
            decoder: StreamDecoder::new(),
            buffer: String::new(),
            phase: Phase::Streaming,
        })
    }
}

/// A live streaming session for one submission
pub struct OptimizeSession {
    stream: Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>,
    decoder: StreamDecoder,
    buffer: String,
    phase: Phase,
}

impl std::fmt::Debug for OptimizeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimizeSession")
            .field("decoder", &self.decoder)
            .field("buffer", &self.buffer)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl OptimizeSession {
    /// Current controller phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The display buffer accumulated so far
    ///
    /// Append-only while streaming; after an error it holds whatever partial
    /// text arrived before the failure.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Pull the next decoded fragment, appending it to the buffer
    ///
    /// Returns `Ok(None)` on clean exhaustion (`Streaming -> Done`). A
    /// transport or decode failure moves the session to `Error`; the partial
    /// buffer stays readable.
    pub async fn next_fragment(&mut self) -> Result<Option<String>> {
        loop {
            match self.stream.next().await {
                Some(Ok(chunk)) => {
                    let text = self.decoder.decode(&chunk).map_err(|e| {
                        self.phase = Phase::Error;
                        ClientError::Stream(e.to_string())
                    })?;
                    if text.is_empty() {
                        // Chunk ended mid-character; pull more bytes
                        continue;
                    }
                    self.buffer.push_str(&text);
                    return Ok(Some(text));
                }
                Some(Err(e)) => {
                    self.phase = Phase::Error;
                    return Err(ClientError::Http(e));
                }
                None => {
                    if let Err(e) = self.decoder.finish() {
                        self.phase = Phase::Error;
                        return Err(ClientError::Stream(e.to_string()));
                    }
                    self.phase = Phase::Done;
                    return Ok(None);
                }
            }
        }
    }

    /// Drain the stream to completion
    pub async fn run_to_end(&mut self) -> Result<()> {
        while self.next_fragment().await?.is_some() {}
        Ok(())
    }

    /// Derive the discrete result entries from the final buffer
    pub fn into_entries(self) -> Vec<String> {
        split_entries(&self.buffer)
    }
}
