//! Stateful UTF-8 decoding across arbitrary chunk boundaries
//!
//! Fragments arrive as raw byte chunks that can end in the middle of a
//! multi-byte sequence, so decoding must carry trailing bytes over to the
//! next chunk rather than treat each chunk independently.

use thiserror::Error;

/// Decoding failure
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A byte sequence that can never form a valid character
    #[error("invalid UTF-8 at byte offset {offset}")]
    InvalidUtf8 {
        /// Offset of the offending byte within the pending buffer
        offset: usize,
    },
    /// The stream ended in the middle of a multi-byte sequence
    #[error("stream ended mid-character ({pending} bytes pending)")]
    Truncated {
        /// Number of undecoded trailing bytes
        pending: usize,
    },
}

/// Incremental UTF-8 decoder
///
/// Feed chunks with [`Self::decode`]; each call returns the longest prefix
/// that forms complete characters and retains any trailing partial sequence
/// for the next call. Call [`Self::finish`] after the last chunk to surface
/// a stream that was cut mid-character.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    pending: Vec<u8>,
}

impl StreamDecoder {
    /// Create a decoder with no pending bytes
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, returning the completed text
    ///
    /// Returns an empty string when the chunk only extends a still-incomplete
    /// multi-byte sequence.
    pub fn decode(&mut self, chunk: &[u8]) -> Result<String, DecodeError> {
        self.pending.extend_from_slice(chunk);

        match std::str::from_utf8(&self.pending) {
            Ok(text) => {
                let out = text.to_owned();
                self.pending.clear();
                Ok(out)
            }
            Err(error) => {
                if error.error_len().is_some() {
                    return Err(DecodeError::InvalidUtf8 {
                        offset: error.valid_up_to(),
                    });
                }
                // Incomplete trailing sequence: emit the valid prefix, keep the tail
                let valid = error.valid_up_to();
                let out = std::str::from_utf8(&self.pending[..valid])
                    .expect("prefix validated by from_utf8")
                    .to_owned();
                self.pending.drain(..valid);
                Ok(out)
            }
        }
    }

    /// Assert that no partial character is left once the stream ends
    pub fn finish(&self) -> Result<(), DecodeError> {
        if self.pending.is_empty() {
            Ok(())
        } else {
            Err(DecodeError::Truncated {
                pending: self.pending.len(),
            })
        }
    }
}
