//! # Recovery Shares: Shamir's Secret Sharing over GF(256)
//!
//! Splits a secret (typically a vault master key or password) into `n`
//! shares with a reconstruction threshold of `t`. Any `t` shares recover the
//! secret. Fewer than `t` shares leave it all but undetermined.
//!
//! The higher coefficients are drawn from `[1, 255]`, never zero, so every
//! polynomial has degree exactly `t - 1`. The price is small and known: with
//! `t = 2` a single share byte `s + c` can never equal the secret byte `s`,
//! which rules out one of 256 candidates per position. The other 255 stay
//! equally likely.
//!
//! ## Shape of a share
//!
//! ```text
//! [ index | f_0(index) | f_1(index) | ... | f_{m-1}(index) ]
//!   1 byte   one byte per secret byte
//! ```
//!
//! The index is the x-coordinate (1..=255; x = 0 is where the secret lives).
//! Every secret byte gets its own independent random polynomial. Reusing
//! coefficients across positions would leak relations between secret bytes,
//! so don't "optimize" that.
//!
//! ## Usage
//!
//! ```
//! use vaultkeep_core::sharing::{combine, split};
//!
//! let shares = split(b"hello", 5, 3).unwrap();
//! assert_eq!(shares.len(), 5);
//!
//! let picked = [shares[4].clone(), shares[0].clone(), shares[2].clone()];
//! assert_eq!(combine(&picked, Some(3)).unwrap(), b"hello");
//! ```

pub mod shamir;
pub mod share;

use thiserror::Error;

use crate::encoding::EncodingError;
use crate::field::FieldError;

pub use shamir::{combine, split, split_with_rng, SplitParameters};
pub use share::Share;

/// Errors from splitting, combining, or decoding shares.
#[derive(Debug, Error)]
pub enum ShamirError {
    /// Share count / threshold outside `2 <= threshold <= num_shares <= 255`.
    #[error(
        "invalid sharing parameters: {num_shares} shares with threshold {threshold} \
         (need 2 <= threshold <= shares <= 255)"
    )]
    InvalidParameters {
        /// Requested (or supplied) number of shares.
        num_shares: usize,
        /// Requested threshold.
        threshold: usize,
    },

    /// Nothing to split.
    #[error("secret must not be empty")]
    EmptySecret,

    /// Fewer shares than the threshold were handed to `combine`.
    #[error("need at least {required} shares to combine, got {provided}")]
    InsufficientShares {
        /// The threshold in force.
        required: usize,
        /// How many shares were supplied.
        provided: usize,
    },

    /// A share's bytes don't form a valid share.
    #[error("malformed share: {0}")]
    MalformedShare(&'static str),

    /// Shares from different splits (or truncated shares) mixed together.
    #[error("share lengths are inconsistent: expected {expected}, got {got}")]
    InconsistentShareLengths {
        /// Length of the first share.
        expected: usize,
        /// Length of the offending share.
        got: usize,
    },

    /// The same x-coordinate appears twice.
    #[error("duplicate share index: {0}")]
    DuplicateShareIndex(u8),

    /// Share text didn't decode.
    #[error("share encoding: {0}")]
    Encoding(#[from] EncodingError),

    /// Field arithmetic failed during interpolation.
    #[error(transparent)]
    Field(#[from] FieldError),
}
