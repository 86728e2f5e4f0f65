//! Crate-level error for operations that span several components.
//!
//! Each module keeps its own error enum; this just lets the composite
//! operations (`gate`, password-sealed envelopes) use `?` across them.

use thiserror::Error;

use crate::crypto::{EncryptionError, KdfError};
use crate::encoding::EncodingError;
use crate::field::FieldError;
use crate::sharing::ShamirError;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Sharing(#[from] ShamirError),

    #[error(transparent)]
    Kdf(#[from] KdfError),

    #[error(transparent)]
    Encryption(#[from] EncryptionError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl VaultError {
    /// True for the undifferentiated decrypt failure.
    pub fn is_decrypt_failure(&self) -> bool {
        matches!(self, Self::Encryption(EncryptionError::DecryptFailure))
    }
}
