//! Client for the upstream OpenAI-compatible completion service

use std::pin::Pin;
use std::time::Duration;

use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};
use promptpilot_config::UpstreamConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::RelayError;
use crate::protocol::{CompletionRequest, StreamChunk};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Ordered stream of decoded text fragments from the completion service
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, RelayError>> + Send>>;

/// One upstream SSE event, classified
enum Frame {
    /// Text delta to forward
    Delta(String),
    /// Event carrying no forwardable text (role chunk, finish chunk, noise)
    Skip,
    /// Explicit completion signal
    Done,
    /// Transport or protocol failure mid-stream
    Failed(RelayError),
}

/// Client for the upstream completion endpoint
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
    api_key: SecretString,
    response_timeout: Duration,
}

impl UpstreamClient {
    /// Create from upstream configuration
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub fn new(config: &UpstreamConfig) -> Result<Self, RelayError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("valid default URL"));

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| RelayError::Internal(anyhow::anyhow!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            response_timeout: Duration::from_secs(config.response_timeout_secs),
        })
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    /// Open a streaming completion and return its ordered text fragments
    ///
    /// The returned stream is pull-based: an upstream event is consumed only
    /// when the caller polls for the next fragment, so downstream
    /// backpressure suspends the upstream read. Dropping the stream aborts
    /// the upstream connection.
    pub async fn stream_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<FragmentStream, RelayError> {
        let send = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send();

        let response = tokio::time::timeout(self.response_timeout, send)
            .await
            .map_err(|_| RelayError::Upstream("timed out waiting for upstream response".to_owned()))?
            .map_err(|e| {
                tracing::error!(error = %e, "upstream request failed");
                RelayError::Upstream(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "upstream returned error");
            return Err(RelayError::Upstream(format!("upstream returned {status}: {body}")));
        }

        let fragments = response
            .bytes_stream()
            .eventsource()
            .map(|result| match result {
                Ok(event) => {
                    let data = event.data.trim();
                    if data == "[DONE]" {
                        return Frame::Done;
                    }

                    match serde_json::from_str::<StreamChunk>(data) {
                        Ok(chunk) => chunk
                            .choices
                            .into_iter()
                            .next()
                            .and_then(|choice| choice.delta.content)
                            .map_or(Frame::Skip, Frame::Delta),
                        Err(e) => {
                            tracing::debug!(error = %e, data, "skipping unparseable SSE chunk");
                            Frame::Skip
                        }
                    }
                }
                Err(e) => Frame::Failed(RelayError::Streaming(e.to_string())),
            })
            .take_while(|frame| futures_util::future::ready(!matches!(frame, Frame::Done)))
            .filter_map(|frame| {
                futures_util::future::ready(match frame {
                    Frame::Delta(text) => Some(Ok(text)),
                    Frame::Failed(error) => Some(Err(error)),
                    Frame::Skip | Frame::Done => None,
                })
            });

        Ok(Box::pin(fragments))
    }
}
