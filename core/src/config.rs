//! # Security Parameters & Constants
//!
//! Every magic number in the vault core lives here. If you're hardcoding an
//! iteration count somewhere else, you're doing it wrong.
//!
//! These values are baked into every envelope and password-check record
//! ever written. Changing a default is not a bug fix, it is a format break:
//! existing vaults would stop unlocking. Bump [`PARAMS_VERSION`] and migrate
//! explicitly, or leave them alone.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Versioning
// ---------------------------------------------------------------------------

/// Generation of the default security parameters below. Persisted inside
/// [`KdfParams`] so a stored parameter set can say which defaults it was
/// written against.
pub const PARAMS_VERSION: u16 = 1;

// ---------------------------------------------------------------------------
// Key Derivation
// ---------------------------------------------------------------------------

/// Default PBKDF2 iteration count. High enough to make offline guessing
/// expensive, low enough that unlocking a vault doesn't feel like a punishment.
pub const PBKDF2_DEFAULT_ITERATIONS: u32 = 100_000;

/// Below this we still derive, but we complain about it in the logs.
pub const PBKDF2_MIN_RECOMMENDED_ITERATIONS: u32 = 10_000;

/// Salt length in bytes. One salt per vault, generated once.
pub const SALT_LENGTH: usize = 16;

// ---------------------------------------------------------------------------
// Symmetric Encryption
// ---------------------------------------------------------------------------

/// AES-256-GCM, because NIST got that one right.
pub const SYMMETRIC_ALGORITHM: &str = "AES-256-GCM";

/// AES-256-GCM key length in bytes. Also the PBKDF2 output length.
pub const AES_KEY_LENGTH: usize = 32;

/// AES-256-GCM nonce length in bytes. 96 bits. Twelve. Not sixteen.
pub const AES_NONCE_LENGTH: usize = 12;

/// AES-256-GCM authentication tag length in bytes.
pub const AES_TAG_LENGTH: usize = 16;

// ---------------------------------------------------------------------------
// Secret Sharing
// ---------------------------------------------------------------------------

/// 1-of-n sharing is just handing out copies.
pub const MIN_THRESHOLD: usize = 2;

/// Share indices are the nonzero elements of GF(256).
pub const MAX_SHARES: usize = 255;

// ---------------------------------------------------------------------------
// Password Gate
// ---------------------------------------------------------------------------

/// The plaintext sealed inside every password-check record. Its only job is
/// to decrypt to exactly these bytes under the right password.
pub const PASSWORD_CHECK_MARKER: &[u8] = b"vaultkeep:password-check:v1";

// ---------------------------------------------------------------------------
// Overridable parameter set
// ---------------------------------------------------------------------------

/// PRF used inside PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HashAlgorithm {
    /// HMAC-SHA-256. The default.
    #[default]
    Sha256,
    /// HMAC-SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Parse a user-supplied name. Accepts `sha256`, `sha-256`, `sha512`,
    /// `sha-512` (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Some(Self::Sha256),
            "sha512" | "sha-512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Sha512 => "SHA-512",
        }
    }
}

/// Key-derivation parameters.
///
/// A derived key is bound to `(password, salt, iterations, hash)`. Change
/// any of the last two and the same password produces a different key, so
/// these travel with the vault (or are pinned by the caller) rather than
/// being silently "improved".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Which generation of defaults this set was written against.
    #[serde(default = "default_version")]
    pub version: u16,
    /// PBKDF2 iteration count.
    pub iterations: u32,
    /// PBKDF2 PRF.
    #[serde(default)]
    pub hash: HashAlgorithm,
}

fn default_version() -> u16 {
    PARAMS_VERSION
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            version: PARAMS_VERSION,
            iterations: PBKDF2_DEFAULT_ITERATIONS,
            hash: HashAlgorithm::Sha256,
        }
    }
}

impl KdfParams {
    /// Defaults with a different iteration count.
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    /// Same parameters, different PRF.
    pub fn hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    /// Whether this set was written against a generation of defaults this
    /// build knows how to honor. Only [`PARAMS_VERSION`] qualifies.
    pub fn is_supported(&self) -> bool {
        self.version == PARAMS_VERSION
    }

    /// Whether the iteration count is below what we'd recommend.
    pub fn is_weak(&self) -> bool {
        self.iterations < PBKDF2_MIN_RECOMMENDED_ITERATIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_parameter_sizes() {
        assert_eq!(AES_KEY_LENGTH, 32);
        assert_eq!(AES_NONCE_LENGTH, 12);
        assert_eq!(AES_TAG_LENGTH, 16);
        assert_eq!(SALT_LENGTH, 16);
        assert_eq!(SYMMETRIC_ALGORITHM, "AES-256-GCM");
    }

    #[test]
    fn test_sharing_bounds() {
        assert!(MIN_THRESHOLD <= MAX_SHARES);
        assert_eq!(MAX_SHARES, u8::MAX as usize);
    }

    #[test]
    fn test_default_params_match_constants() {
        let params = KdfParams::default();
        assert_eq!(params.version, PARAMS_VERSION);
        assert_eq!(params.iterations, PBKDF2_DEFAULT_ITERATIONS);
        assert_eq!(params.hash, HashAlgorithm::Sha256);
        assert!(!params.is_weak());
    }

    #[test]
    fn test_weak_params_flagged() {
        assert!(KdfParams::with_iterations(1_000).is_weak());
        assert!(!KdfParams::with_iterations(PBKDF2_MIN_RECOMMENDED_ITERATIONS).is_weak());
    }

    #[test]
    fn test_hash_algorithm_names() {
        assert_eq!(HashAlgorithm::from_name("SHA-256"), Some(HashAlgorithm::Sha256));
        assert_eq!(HashAlgorithm::from_name("sha512"), Some(HashAlgorithm::Sha512));
        assert_eq!(HashAlgorithm::from_name("md5"), None);
        assert_eq!(HashAlgorithm::Sha512.name(), "SHA-512");
    }

    #[test]
    fn test_params_json_roundtrip_and_defaults() {
        let params = KdfParams::with_iterations(250_000).hash(HashAlgorithm::Sha512);
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"sha512\""));
        let back: KdfParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);

        // Older parameter files without version/hash still load.
        let minimal: KdfParams = serde_json::from_str(r#"{"iterations": 5000}"#).unwrap();
        assert_eq!(minimal.version, PARAMS_VERSION);
        assert_eq!(minimal.hash, HashAlgorithm::Sha256);
        assert!(minimal.is_supported());
    }

    #[test]
    fn test_other_generations_unsupported() {
        let future: KdfParams =
            serde_json::from_str(r#"{"version": 99, "iterations": 1000}"#).unwrap();
        assert_eq!(future.version, 99);
        assert!(!future.is_supported());

        let ancient = KdfParams {
            version: 0,
            ..KdfParams::default()
        };
        assert!(!ancient.is_supported());
    }
}
