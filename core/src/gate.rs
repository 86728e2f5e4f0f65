//! # Password Verification Gate
//!
//! How do you check a password without storing it, its hash, or the key it
//! derives? Encrypt a known marker under the derived key and keep the
//! envelope. Later, derive again and see whether the marker comes back.
//!
//! [`verify`] is a pure predicate. It never returns an error and never
//! panics: wrong password, wrong salt, tampered record, garbage record, all
//! of it is just `false`. Callers get a uniform answer and attackers get no
//! hint about which check failed.
//!
//! There is no recovery path here. A forgotten password with no
//! distributed shares means the vault is gone.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{KdfParams, PASSWORD_CHECK_MARKER};
use crate::crypto::{decrypt, derive_key, encrypt, DerivedKey, EncryptedEnvelope};
use crate::encoding::EncodingError;
use crate::error::VaultError;

/// An envelope wrapping [`PASSWORD_CHECK_MARKER`], persisted next to the
/// vault salt. Serializes exactly like the envelope it wraps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordCheckRecord {
    envelope: EncryptedEnvelope,
}

impl PasswordCheckRecord {
    pub fn from_envelope(envelope: EncryptedEnvelope) -> Self {
        Self { envelope }
    }

    pub fn envelope(&self) -> &EncryptedEnvelope {
        &self.envelope
    }

    pub fn into_envelope(self) -> EncryptedEnvelope {
        self.envelope
    }

    pub fn to_json(&self) -> Result<String, EncodingError> {
        self.envelope.to_json()
    }

    pub fn from_json(json: &str) -> Result<Self, EncodingError> {
        EncryptedEnvelope::from_json(json).map(Self::from_envelope)
    }
}

/// Derive a key from `(password, salt)` and seal the marker under it.
///
/// The salt is also written into the record's envelope so the record can be
/// stored on its own.
pub fn create_check(
    password: &str,
    salt: &[u8],
    params: &KdfParams,
) -> Result<PasswordCheckRecord, VaultError> {
    let key = derive_key(password, salt, params)?;
    let envelope = encrypt(PASSWORD_CHECK_MARKER, &key)?.with_salt(salt);
    debug!(iterations = params.iterations, "password check record created");
    Ok(PasswordCheckRecord::from_envelope(envelope))
}

/// `true` only if the record decrypts under `(password, salt)` AND the
/// result is exactly the marker. Everything else is `false`.
pub fn verify(password: &str, salt: &[u8], record: &PasswordCheckRecord, params: &KdfParams) -> bool {
    unlock(password, salt, record, params).is_some()
}

/// [`verify`], handing back the session key on success.
///
/// Saves a second derivation when the caller is about to decrypt vault
/// contents anyway.
pub fn unlock(
    password: &str,
    salt: &[u8],
    record: &PasswordCheckRecord,
    params: &KdfParams,
) -> Option<DerivedKey> {
    let key = derive_key(password, salt, params).ok()?;
    match decrypt(&record.envelope, &key) {
        Ok(marker) if marker == PASSWORD_CHECK_MARKER => Some(key),
        _ => {
            debug!("password check did not match");
            None
        }
    }
}
