//! # Finite Field Arithmetic
//!
//! Byte-wise arithmetic in GF(2^8) and the two polynomial operations secret
//! sharing needs on top of it: evaluation (to make shares) and Lagrange
//! interpolation at zero (to recover the secret).

pub mod gf256;
pub mod polynomial;

use thiserror::Error;

pub use polynomial::{evaluate, interpolate_at_zero};

/// Field-level failures. Both are programmer errors: valid share sets never
/// trigger them, but we return them instead of panicking so a malformed
/// input can't take the process down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Division by the zero element.
    #[error("division by zero in GF(256)")]
    DivisionByZero,

    /// Zero has no multiplicative inverse.
    #[error("zero has no multiplicative inverse in GF(256)")]
    NoInverse,
}
