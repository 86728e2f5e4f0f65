//! Password in, envelope out.
//!
//! For callers that don't want to juggle salts: [`seal_with_password`]
//! generates a fresh salt, derives a key, encrypts, and stores the salt in
//! the envelope. [`open_with_password`] reads it back out. The envelope is
//! self-contained apart from the password (and the [`KdfParams`], which are
//! pinned by the caller).

use super::encryption::{decrypt, encrypt, EncryptionError};
use super::envelope::EncryptedEnvelope;
use super::kdf::{derive_key, generate_salt};
use crate::config::KdfParams;
use crate::error::VaultError;

pub fn seal_with_password(
    password: &str,
    plaintext: &[u8],
    params: &KdfParams,
) -> Result<EncryptedEnvelope, VaultError> {
    let salt = generate_salt();
    let key = derive_key(password, &salt, params)?;
    Ok(encrypt(plaintext, &key)?.with_salt(&salt))
}

/// Open an envelope made by [`seal_with_password`].
///
/// A missing or mangled salt is reported as a decrypt failure like every
/// other envelope problem.
pub fn open_with_password(
    password: &str,
    envelope: &EncryptedEnvelope,
    params: &KdfParams,
) -> Result<Vec<u8>, VaultError> {
    let salt = envelope
        .salt_bytes()
        .map_err(|_| EncryptionError::DecryptFailure)?;
    if salt.is_empty() {
        return Err(EncryptionError::DecryptFailure.into());
    }
    let key = derive_key(password, &salt, params)?;
    Ok(decrypt(envelope, &key)?)
}
