//! # AES-256-GCM Encryption
//!
//! Authenticated encryption for vault contents and password-check records.
//!
//! ## Nonce management
//!
//! GCM is notoriously unforgiving about nonce reuse. Encrypt two messages
//! under the same key and nonce and an attacker gets the XOR of the
//! plaintexts AND the ability to forge tags. Game over.
//!
//! Our strategy: a random 96-bit nonce from a CSPRNG on every call. The
//! birthday bound for 96-bit nonces is ~2^48 messages per key, which a
//! personal vault will not get anywhere near.
//!
//! ## Failure reporting
//!
//! Decryption has exactly one failure: [`EncryptionError::DecryptFailure`].
//! Wrong key, flipped bit, truncated tag, garbage base64, short IV, all the
//! same. The difference is none of an attacker's business.

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce,
};
use thiserror::Error;
use tracing::debug;

use super::envelope::EncryptedEnvelope;
use super::kdf::DerivedKey;
use crate::config::AES_NONCE_LENGTH;
use crate::random::SecureRandom;

/// Errors that can occur during encryption/decryption.
///
/// Intentionally vague. Detailed error messages about cryptographic
/// failures are a gift to attackers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncryptionError {
    #[error("encryption failed")]
    EncryptFailed,

    #[error("decryption failed")]
    DecryptFailure,
}

fn cipher_for(key: &DerivedKey) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.expose()))
}

/// Encrypt `plaintext` under `key` with a fresh random nonce.
///
/// The returned envelope has an empty salt; attach one with
/// [`EncryptedEnvelope::with_salt`] if it has to travel along.
///
/// # Example
///
/// ```
/// use vaultkeep_core::crypto::{decrypt, derive_key, encrypt};
/// use vaultkeep_core::KdfParams;
///
/// let key = derive_key("hunter2", b"per-vault-salt!!", &KdfParams::with_iterations(1_000)).unwrap();
/// let envelope = encrypt(b"the combination is 12-34-56", &key).unwrap();
/// assert_eq!(decrypt(&envelope, &key).unwrap(), b"the combination is 12-34-56");
/// ```
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> Result<EncryptedEnvelope, EncryptionError> {
    encrypt_with_aad(plaintext, b"", key)
}

/// Decrypt an envelope produced by [`encrypt`].
pub fn decrypt(envelope: &EncryptedEnvelope, key: &DerivedKey) -> Result<Vec<u8>, EncryptionError> {
    decrypt_with_aad(envelope, b"", key)
}

/// Encrypt with Additional Authenticated Data.
///
/// The AAD is authenticated but NOT encrypted and NOT stored in the
/// envelope. Use it to bind a ciphertext to its context (a record id, a
/// field name) so it can't be swapped into another slot. The same AAD must
/// be supplied to [`decrypt_with_aad`].
pub fn encrypt_with_aad(
    plaintext: &[u8],
    aad: &[u8],
    key: &DerivedKey,
) -> Result<EncryptedEnvelope, EncryptionError> {
    encrypt_with_rng(plaintext, aad, key, &mut rand::rngs::OsRng)
}

/// [`encrypt_with_aad`] with a caller-supplied nonce source.
pub fn encrypt_with_rng<R: SecureRandom + ?Sized>(
    plaintext: &[u8],
    aad: &[u8],
    key: &DerivedKey,
    rng: &mut R,
) -> Result<EncryptedEnvelope, EncryptionError> {
    let mut nonce_bytes = [0u8; AES_NONCE_LENGTH];
    rng.fill_secure(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher_for(key)
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_| EncryptionError::EncryptFailed)?;

    debug!(plaintext_len = plaintext.len(), "payload encrypted");
    Ok(EncryptedEnvelope::from_raw(&nonce_bytes, &ciphertext))
}

/// Decrypt an envelope produced by [`encrypt_with_aad`].
///
/// Any failure (undecodable fields, wrong nonce length, wrong key, wrong
/// AAD, modified ciphertext) is reported as [`EncryptionError::DecryptFailure`].
pub fn decrypt_with_aad(
    envelope: &EncryptedEnvelope,
    aad: &[u8],
    key: &DerivedKey,
) -> Result<Vec<u8>, EncryptionError> {
    let nonce_bytes = envelope
        .iv_bytes()
        .map_err(|_| EncryptionError::DecryptFailure)?;
    if nonce_bytes.len() != AES_NONCE_LENGTH {
        return Err(EncryptionError::DecryptFailure);
    }
    let ciphertext = envelope
        .ciphertext_bytes()
        .map_err(|_| EncryptionError::DecryptFailure)?;

    cipher_for(key)
        .decrypt(
            Nonce::from_slice(&nonce_bytes),
            Payload {
                msg: &ciphertext,
                aad,
            },
        )
        .map_err(|_| EncryptionError::DecryptFailure)
}
