//! Typed client for the promptpilot streaming relay
//!
//! Drives one optimization submission end to end: POST the prompt, consume
//! the chunked plain-text body fragment by fragment with stateful UTF-8
//! decoding, accumulate the display buffer, and derive discrete result
//! entries once the stream is exhausted. No retries; a failed session is
//! discarded and a fresh submission started.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod client;
mod decode;
mod entries;
mod error;

pub use client::{OptimizeSession, Phase, RelayClient};
pub use decode::{DecodeError, StreamDecoder};
pub use entries::split_entries;
pub use error::{ClientError, Result};
