//! Streaming relay between the prompt form and the upstream completion service
//!
//! Accepts a prompt over HTTP, wraps it in the fixed optimization template,
//! opens a streaming completion against an OpenAI-compatible API, and
//! forwards each decoded text delta to the caller as it arrives. Nothing is
//! accumulated server-side and no state survives a request.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod handler;
pub mod protocol;
pub mod state;
pub mod template;
pub mod upstream;

pub use error::RelayError;
pub use handler::relay_router;
pub use state::RelayState;
pub use upstream::{FragmentStream, UpstreamClient};
