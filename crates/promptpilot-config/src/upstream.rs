use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Configuration for the upstream completion service
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// API key for authentication; must be present and non-empty at startup
    pub api_key: SecretString,
    /// Base URL override (defaults to the canonical `OpenAI` API)
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier sent in the completion payload
    #[serde(default = "default_model")]
    pub model: String,
    /// Connection establishment bound, in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Bound on waiting for the upstream response head, in seconds
    ///
    /// Applies only until the first byte of the response; the stream itself
    /// carries no overall deadline since completions legitimately run long.
    #[serde(default = "default_response_timeout")]
    pub response_timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_owned()
}

const fn default_connect_timeout() -> u64 {
    10
}

const fn default_response_timeout() -> u64 {
    30
}
