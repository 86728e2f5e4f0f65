//! # Text Encoding
//!
//! Everything that leaves the process (shares, envelope fields) travels as
//! standard, padded base64. One engine, one alphabet, no surprises when a
//! share typed in from paper comes back in.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Failures turning text back into bytes.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Encode bytes as standard base64.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard base64. Surrounding whitespace is tolerated, since
/// shares tend to arrive by copy-paste.
pub fn from_base64(text: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(STANDARD.decode(text.trim())?)
}
