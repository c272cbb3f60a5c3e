//! JSON codec errors.

use thiserror::Error;

/// A payload could not be read or written as JSON.
#[derive(Debug, Error)]
pub enum JsonCodecError {
    /// The payload is not valid JSON.
    #[error("Invalid JSON payload: {0}")]
    Decode(#[source] serde_json::Error),

    /// The document could not be encoded.
    #[error("Failed to encode JSON document: {0}")]
    Encode(#[source] serde_json::Error),
}
