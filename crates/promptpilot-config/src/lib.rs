#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod server;
pub mod upstream;

use serde::Deserialize;

pub use server::{HealthConfig, ServerConfig};
pub use upstream::UpstreamConfig;

/// Top-level promptpilot configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream completion service configuration
    pub upstream: UpstreamConfig,
}
