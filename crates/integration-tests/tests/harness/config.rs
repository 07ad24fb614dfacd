//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use promptpilot_config::{Config, HealthConfig, ServerConfig, UpstreamConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder pointed at the given upstream base URL
    pub fn new(upstream_base_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                upstream: UpstreamConfig {
                    api_key: SecretString::from("test-key"),
                    base_url: Some(upstream_base_url.parse().expect("valid URL")),
                    model: "gpt-3.5-turbo".to_owned(),
                    connect_timeout_secs: 5,
                    response_timeout_secs: 5,
                },
            },
        }
    }

    /// Replace the upstream API key
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.config.upstream.api_key = SecretString::from(key);
        self
    }

    /// Disable the health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
