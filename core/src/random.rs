//! # Secure Randomness
//!
//! Split/combine and the cipher wrapper never talk to an RNG directly; they
//! ask a [`SecureRandom`]. The trait is blanket-implemented for every
//! `RngCore + CryptoRng`, so the platform source (`OsRng`) is the default
//! and anything else with the `CryptoRng` marker slots in unchanged.
//!
//! If your OS RNG is broken, you have bigger problems than this crate.

use std::num::NonZeroU32;

use rand_core::{CryptoRng, RngCore};

/// A cryptographically secure source of random bytes.
pub trait SecureRandom {
    /// Fill `dest` with random bytes.
    fn fill_secure(&mut self, dest: &mut [u8]);

    /// A uniformly distributed value in `[0, range)`.
    ///
    /// Draws the fewest whole bytes that can represent `range - 1`, rejects
    /// any draw that falls in the biased tail above the largest multiple of
    /// `range`, and reduces the survivor modulo `range`. No modulo bias.
    fn random_below(&mut self, range: NonZeroU32) -> u32 {
        let range = u64::from(range.get());
        if range == 1 {
            return 0;
        }

        let bits = u64::BITS - (range - 1).leading_zeros();
        let byte_count = bits.div_ceil(8) as usize;
        let space = 1u64 << (8 * byte_count);
        let limit = space - space % range;

        let mut buf = [0u8; 4];
        loop {
            self.fill_secure(&mut buf[..byte_count]);
            let value = buf[..byte_count]
                .iter()
                .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
            if value < limit {
                return (value % range) as u32;
            }
        }
    }

    /// A uniformly distributed byte in `[1, 255]`, by rejecting zero.
    fn random_nonzero_byte(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        loop {
            self.fill_secure(&mut byte);
            if byte[0] != 0 {
                return byte[0];
            }
        }
    }
}

impl<R: RngCore + CryptoRng + ?Sized> SecureRandom for R {
    fn fill_secure(&mut self, dest: &mut [u8]) {
        self.fill_bytes(dest);
    }
}

/// Fill a fresh array from the platform CSPRNG.
pub fn random_array<const N: usize>() -> [u8; N] {
    let mut out = [0u8; N];
    rand::rngs::OsRng.fill_secure(&mut out);
    out
}
