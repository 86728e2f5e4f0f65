//! # Encrypted Envelope
//!
//! The persisted form of every encrypted value: three base64 strings.
//!
//! ```json
//! { "iv": "...", "ciphertext": "...", "salt": "..." }
//! ```
//!
//! `iv` is the 96-bit GCM nonce, `ciphertext` carries the 16-byte tag at its
//! end, and `salt` is filled in only when the derivation salt has to travel
//! with the envelope (empty when the caller tracks it separately).
//!
//! Fields stay as text until the cipher wrapper decodes them, so a mangled
//! field is just another flavor of "decryption failed".

use serde::{Deserialize, Serialize};

use crate::encoding::{from_base64, to_base64, EncodingError};

/// `{iv, ciphertext, salt}`, each base64 text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// Base64 nonce, unique per encryption.
    pub iv: String,
    /// Base64 ciphertext with the authentication tag appended.
    pub ciphertext: String,
    /// Base64 derivation salt, or empty.
    #[serde(default)]
    pub salt: String,
}

impl EncryptedEnvelope {
    pub(crate) fn from_raw(iv: &[u8], ciphertext: &[u8]) -> Self {
        Self {
            iv: to_base64(iv),
            ciphertext: to_base64(ciphertext),
            salt: String::new(),
        }
    }

    /// Attach the derivation salt.
    pub fn with_salt(mut self, salt: &[u8]) -> Self {
        self.salt = to_base64(salt);
        self
    }

    pub fn has_salt(&self) -> bool {
        !self.salt.is_empty()
    }

    pub fn iv_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        from_base64(&self.iv)
    }

    pub fn ciphertext_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        from_base64(&self.ciphertext)
    }

    pub fn salt_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        from_base64(&self.salt)
    }

    /// Compact JSON, the form handed to the persistence layer.
    pub fn to_json(&self) -> Result<String, EncodingError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, EncodingError> {
        Ok(serde_json::from_str(json)?)
    }
}
