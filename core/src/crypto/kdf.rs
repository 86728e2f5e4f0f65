//! # Key Derivation
//!
//! PBKDF2-HMAC turns a password and a per-vault salt into 32 bytes of AES
//! key material. The salt defeats rainbow tables, the iteration count makes
//! every guess expensive, and determinism is the whole point: the same
//! `(password, salt, params)` must give the same key after a restart, or
//! nobody ever opens their vault again.
//!
//! The output lives in a [`DerivedKey`], which can't be printed, compared,
//! cloned, or serialized, and is wiped from memory when dropped. The only
//! thing that ever reads its bytes is the cipher wrapper.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::{Sha256, Sha512};
use thiserror::Error;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::config::{
    HashAlgorithm, KdfParams, AES_KEY_LENGTH, PARAMS_VERSION, PBKDF2_MIN_RECOMMENDED_ITERATIONS,
    SALT_LENGTH,
};
use crate::random::SecureRandom;

/// Errors from key derivation. Deliberately short on detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KdfError {
    /// Parameters that would produce a useless key.
    #[error("invalid key derivation parameters: {0}")]
    InvalidParameters(&'static str),

    /// Raw key material of the wrong size.
    #[error("invalid key length: expected {AES_KEY_LENGTH} bytes")]
    InvalidKeyLength,

    /// Parameters written against a generation of defaults we don't speak.
    #[error("unsupported key derivation parameter version {0} (expected {PARAMS_VERSION})")]
    UnsupportedVersion(u16),
}

/// Opaque symmetric key material.
///
/// Intentionally NOT `Clone`, `PartialEq`, or `Serialize`. Comparing keys by
/// value or shoving one into a JSON response should require going out of
/// your way, and this type doesn't offer a way.
pub struct DerivedKey {
    bytes: Zeroizing<[u8; AES_KEY_LENGTH]>,
}

impl DerivedKey {
    /// Wrap existing key material, e.g. a master key recovered from shares.
    pub fn from_key_material(material: &[u8]) -> Result<Self, KdfError> {
        let mut bytes = Zeroizing::new([0u8; AES_KEY_LENGTH]);
        if material.len() != AES_KEY_LENGTH {
            return Err(KdfError::InvalidKeyLength);
        }
        bytes.copy_from_slice(material);
        Ok(Self { bytes })
    }

    /// Only the cipher wrapper gets to look.
    pub(crate) fn expose(&self) -> &[u8; AES_KEY_LENGTH] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Not even a prefix. A partial leak is still a leak.
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive a key from a password and salt.
///
/// # Errors
///
/// [`KdfError::UnsupportedVersion`] if `params` come from another
/// generation of defaults.
/// [`KdfError::InvalidParameters`] for an empty salt or zero iterations.
/// Weak-but-nonzero iteration counts are accepted with a warning so that
/// old vaults written with them still open.
pub fn derive_key(
    password: impl AsRef<[u8]>,
    salt: &[u8],
    params: &KdfParams,
) -> Result<DerivedKey, KdfError> {
    if !params.is_supported() {
        return Err(KdfError::UnsupportedVersion(params.version));
    }
    if salt.is_empty() {
        return Err(KdfError::InvalidParameters("salt must not be empty"));
    }
    if params.iterations == 0 {
        return Err(KdfError::InvalidParameters("iteration count must be nonzero"));
    }
    if params.is_weak() {
        warn!(
            iterations = params.iterations,
            recommended = PBKDF2_MIN_RECOMMENDED_ITERATIONS,
            "PBKDF2 iteration count below recommended value"
        );
    }

    let mut bytes = Zeroizing::new([0u8; AES_KEY_LENGTH]);
    let password = password.as_ref();
    match params.hash {
        HashAlgorithm::Sha256 => {
            pbkdf2_hmac::<Sha256>(password, salt, params.iterations, &mut bytes[..])
        }
        HashAlgorithm::Sha512 => {
            pbkdf2_hmac::<Sha512>(password, salt, params.iterations, &mut bytes[..])
        }
    }

    debug!(
        iterations = params.iterations,
        hash = params.hash.name(),
        salt_len = salt.len(),
        "key derived"
    );

    Ok(DerivedKey { bytes })
}

/// A fresh per-vault salt from the OS CSPRNG.
pub fn generate_salt() -> [u8; SALT_LENGTH] {
    generate_salt_with_rng(&mut rand::rngs::OsRng)
}

/// A fresh salt from a caller-supplied source.
pub fn generate_salt_with_rng<R: SecureRandom + ?Sized>(rng: &mut R) -> [u8; SALT_LENGTH] {
    let mut salt = [0u8; SALT_LENGTH];
    rng.fill_secure(&mut salt);
    salt
}
