//! # Password-Derived Encryption
//!
//! How vault contents stay unreadable at rest:
//!
//! ```text
//! password + salt ──PBKDF2──▶ DerivedKey ──AES-256-GCM──▶ EncryptedEnvelope
//! ```
//!
//! - **kdf**: PBKDF2-HMAC key derivation into an opaque [`DerivedKey`].
//! - **envelope**: `{iv, ciphertext, salt}`, base64 text, ready for any
//!   key-value store.
//! - **encryption**: the AEAD wrapper. Fresh 96-bit nonce per call, one
//!   undifferentiated failure on the way back.
//! - **sealed**: the "just give it a password" convenience layer.
//!
//! Everything here wraps audited RustCrypto implementations. If you feel the
//! urge to optimize any of it, go read about timing attacks first.

pub mod encryption;
pub mod envelope;
pub mod kdf;
pub mod sealed;

pub use encryption::{decrypt, decrypt_with_aad, encrypt, encrypt_with_aad, EncryptionError};
pub use envelope::EncryptedEnvelope;
pub use kdf::{derive_key, generate_salt, DerivedKey, KdfError};
pub use sealed::{open_with_password, seal_with_password};
