//! Split and combine.

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use super::{ShamirError, Share};
use crate::config::{MAX_SHARES, MIN_THRESHOLD};
use crate::field::{evaluate, interpolate_at_zero};
use crate::random::SecureRandom;

/// How many shares to make and how many it takes to recover.
///
/// The scheme is `(threshold, num_shares)`: any `threshold` shares
/// reconstruct the secret, `threshold - 1` shares leave it undetermined
/// (see the module docs for the one value per byte they rule out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitParameters {
    num_shares: u8,
    threshold: u8,
}

impl SplitParameters {
    /// Validate and build.
    ///
    /// # Constraints
    ///
    /// - `threshold >= 2` (1-of-n is just copying)
    /// - `num_shares >= threshold`
    /// - `num_shares <= 255` (indices are the nonzero bytes of GF(256))
    pub fn new(num_shares: usize, threshold: usize) -> Result<Self, ShamirError> {
        let invalid = ShamirError::InvalidParameters {
            num_shares,
            threshold,
        };
        if threshold < MIN_THRESHOLD || threshold > num_shares || num_shares > MAX_SHARES {
            return Err(invalid);
        }
        let (Ok(num_shares), Ok(threshold)) = (u8::try_from(num_shares), u8::try_from(threshold))
        else {
            return Err(invalid);
        };
        Ok(Self {
            num_shares,
            threshold,
        })
    }

    pub fn num_shares(&self) -> usize {
        usize::from(self.num_shares)
    }

    pub fn threshold(&self) -> usize {
        usize::from(self.threshold)
    }
}

/// Split `secret` into `num_shares` shares, any `threshold` of which
/// recover it. Coefficients come from the OS CSPRNG.
pub fn split(secret: &[u8], num_shares: usize, threshold: usize) -> Result<Vec<Share>, ShamirError> {
    let params = SplitParameters::new(num_shares, threshold)?;
    split_with_rng(secret, params, &mut rand::rngs::OsRng)
}

/// Split with a caller-supplied randomness source.
///
/// For each byte of the secret, builds a polynomial of degree
/// `threshold - 1` whose constant term is that byte and whose higher
/// coefficients are fresh random nonzero field elements, then evaluates it
/// at x = 1, 2, ..., num_shares. Share `i` is `[i] ++ [f_0(i), ..., f_{m-1}(i)]`.
pub fn split_with_rng<R: SecureRandom + ?Sized>(
    secret: &[u8],
    params: SplitParameters,
    rng: &mut R,
) -> Result<Vec<Share>, ShamirError> {
    if secret.is_empty() {
        return Err(ShamirError::EmptySecret);
    }

    let threshold = params.threshold();
    let mut shares: Vec<Share> = (1..=params.num_shares)
        .map(|index| Share::with_capacity(index, secret.len()))
        .collect();

    // [secret_byte, c_1, ..., c_{t-1}], rewritten per position and wiped on drop.
    let mut coefficients = Zeroizing::new(vec![0u8; threshold]);

    for &secret_byte in secret {
        coefficients[0] = secret_byte;
        for coeff in coefficients[1..].iter_mut() {
            *coeff = rng.random_nonzero_byte();
        }

        for share in shares.iter_mut() {
            let y = evaluate(&coefficients, share.index());
            share.push(y);
        }
    }

    debug!(
        num_shares = params.num_shares(),
        threshold,
        secret_len = secret.len(),
        "secret split into shares"
    );

    Ok(shares)
}

/// Recover a secret from shares.
///
/// `threshold` defaults to `shares.len()`. The x-coordinates of the first
/// `threshold` shares are the interpolation nodes; any extra shares are
/// ignored. Order doesn't matter and neither does which subset you pick, as
/// long as the shares came from the same split.
///
/// # Errors
///
/// - [`ShamirError::InsufficientShares`] if fewer than `threshold` shares.
/// - [`ShamirError::DuplicateShareIndex`] if two nodes share an x-coordinate.
/// - [`ShamirError::InconsistentShareLengths`] if the nodes disagree on length.
///
/// **Note**: under-specifying the threshold (say, 2 shares of a 3-of-5
/// split with `threshold = Some(2)`) returns *wrong* bytes without error.
/// Nothing in the shares themselves can tell you the original threshold.
pub fn combine(shares: &[Share], threshold: Option<usize>) -> Result<Vec<u8>, ShamirError> {
    let threshold = threshold.unwrap_or(shares.len());
    if threshold == 0 {
        return Err(ShamirError::InvalidParameters {
            num_shares: shares.len(),
            threshold,
        });
    }
    if shares.len() < threshold {
        return Err(ShamirError::InsufficientShares {
            required: threshold,
            provided: shares.len(),
        });
    }

    let nodes = &shares[..threshold];
    let expected_len = nodes[0].secret_len();

    let mut seen = [false; 256];
    for share in nodes {
        if share.secret_len() != expected_len {
            return Err(ShamirError::InconsistentShareLengths {
                expected: expected_len,
                got: share.secret_len(),
            });
        }
        let index = share.index();
        if seen[usize::from(index)] {
            return Err(ShamirError::DuplicateShareIndex(index));
        }
        seen[usize::from(index)] = true;
    }

    let xs: Vec<u8> = nodes.iter().map(Share::index).collect();
    let mut ys = Zeroizing::new(vec![0u8; threshold]);
    let mut secret = Vec::with_capacity(expected_len);

    for position in 0..expected_len {
        for (y, share) in ys.iter_mut().zip(nodes) {
            *y = share.values()[position];
        }
        secret.push(interpolate_at_zero(&xs, &ys)?);
    }

    debug!(
        shares_used = threshold,
        secret_len = expected_len,
        "secret combined from shares"
    );

    Ok(secret)
}
