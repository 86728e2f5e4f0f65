//! Polynomials over GF(256): evaluation for splitting, interpolation for
//! combining.

use super::gf256::{add, div, mul, sub};
use super::FieldError;

/// Evaluate a polynomial at point `x` using Horner's method.
///
/// `coefficients[0]` is the constant term (the secret byte), `coefficients[1]`
/// the x^1 coefficient, and so on. An empty slice is the zero polynomial.
pub fn evaluate(coefficients: &[u8], x: u8) -> u8 {
    coefficients
        .iter()
        .rev()
        .fold(0u8, |acc, &coeff| add(mul(acc, x), coeff))
}

/// Lagrange interpolation at x = 0.
///
/// Given points `(xs[i], ys[i])`, returns
/// `Σ_i y_i · Π_{j≠i} (0 - x_j) / (x_i - x_j)`.
///
/// Repeated x-coordinates make a denominator vanish and surface as
/// [`FieldError::DivisionByZero`]. Mismatched slice lengths are a caller bug;
/// the extra points on the longer side are ignored.
pub fn interpolate_at_zero(xs: &[u8], ys: &[u8]) -> Result<u8, FieldError> {
    let n = xs.len().min(ys.len());
    let mut secret = 0u8;

    for i in 0..n {
        let mut numerator = 1u8;
        let mut denominator = 1u8;

        for j in 0..n {
            if i == j {
                continue;
            }
            numerator = mul(numerator, sub(0, xs[j]));
            denominator = mul(denominator, sub(xs[i], xs[j]));
        }

        let basis = div(numerator, denominator)?;
        secret = add(secret, mul(ys[i], basis));
    }

    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_polynomial() {
        assert_eq!(evaluate(&[42], 1), 42);
        assert_eq!(evaluate(&[42], 100), 42);
        assert_eq!(evaluate(&[], 7), 0);
    }

    #[test]
    fn evaluate_at_zero_is_constant_term() {
        assert_eq!(evaluate(&[0x99, 0x12, 0x34, 0x56], 0), 0x99);
    }

    #[test]
    fn horner_matches_naive_sum() {
        let coefficients = [0x17, 0xA3, 0x5C, 0xE1];
        for x in 0..=255u8 {
            let mut naive = 0u8;
            let mut power = 1u8;
            for &c in &coefficients {
                naive = add(naive, mul(c, power));
                power = mul(power, x);
            }
            assert_eq!(evaluate(&coefficients, x), naive);
        }
    }

    #[test]
    fn interpolation_recovers_constant_term() {
        let coefficients = [0xC3, 0x01, 0xFE];
        let xs = [3u8, 9, 200];
        let ys: Vec<u8> = xs.iter().map(|&x| evaluate(&coefficients, x)).collect();
        assert_eq!(interpolate_at_zero(&xs, &ys), Ok(0xC3));
    }

    #[test]
    fn flat_points_interpolate_to_their_value() {
        assert_eq!(interpolate_at_zero(&[1, 2, 3], &[42, 42, 42]), Ok(42));
    }

    #[test]
    fn repeated_x_coordinate_is_division_by_zero() {
        assert_eq!(
            interpolate_at_zero(&[5, 5], &[1, 2]),
            Err(FieldError::DivisionByZero)
        );
    }
}
