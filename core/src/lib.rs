// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # vaultkeep: Cryptographic Core
//!
//! The part of the vault that actually matters. Everything else in a personal
//! vault application is forms and key-value CRUD; this crate is the
//! bit that keeps the contents unreadable at rest and lets a handful of
//! trusted people bring a lost master key back from the dead.
//!
//! Two tools, both boring on purpose:
//!
//! - **Shamir's Secret Sharing over GF(256)**: split a secret into `n`
//!   shares, any `t` of which recover it. `t - 1` shares leave it undetermined.
//! - **PBKDF2 + AES-256-GCM**: turn a password into a key, seal data into a
//!   portable envelope, and check a password without ever storing it.
//!
//! ## Architecture
//!
//! - **config**: Security parameters. Named, overridable, versioned.
//! - **field**: GF(256) arithmetic and polynomial evaluation/interpolation.
//! - **random**: The secure randomness capability. Pluggable.
//! - **sharing**: Shares, splitting, and combining.
//! - **crypto**: Key derivation, envelopes, and the AEAD wrapper.
//! - **gate**: Password verification without storing passwords.
//! - **encoding**: Base64 text encoding for everything that leaves the process.
//! - **error**: One error type to rule the composite operations.
//!
//! ## Ground rules
//!
//! 1. Nothing here persists anything. Callers get envelopes, shares, and
//!    records back and are responsible for storing them.
//! 2. Secrets, passwords, and key bytes are never logged. Not at `trace`,
//!    not "just for debugging".
//! 3. Decryption failures are deliberately vague. Wrong key and tampered
//!    ciphertext look identical from the outside.

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod field;
pub mod gate;
pub mod random;
pub mod sharing;

pub use config::{HashAlgorithm, KdfParams};
pub use crypto::{decrypt, derive_key, encrypt, DerivedKey, EncryptedEnvelope};
pub use error::VaultError;
pub use gate::{create_check, unlock, verify, PasswordCheckRecord};
pub use sharing::{combine, split, Share, SplitParameters};
