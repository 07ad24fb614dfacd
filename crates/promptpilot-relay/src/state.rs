//! Shared state for the relay route handlers

use std::sync::Arc;

use promptpilot_config::UpstreamConfig;

use crate::error::RelayError;
use crate::upstream::UpstreamClient;

/// Shared state for relay handlers; cheap to clone
#[derive(Clone)]
pub struct RelayState {
    inner: Arc<RelayStateInner>,
}

struct RelayStateInner {
    upstream: UpstreamClient,
    model: String,
}

impl RelayState {
    /// Build relay state from upstream configuration
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, RelayError> {
        Ok(Self {
            inner: Arc::new(RelayStateInner {
                upstream: UpstreamClient::new(config)?,
                model: config.model.clone(),
            }),
        })
    }

    /// The upstream completion client
    pub fn upstream(&self) -> &UpstreamClient {
        &self.inner.upstream
    }

    /// Model identifier sent in the payload
    pub fn model(&self) -> &str {
        &self.inner.model
    }
}
