//! GF(256) with irreducible polynomial x^8 + x^4 + x^3 + x + 1 (0x11B),
//! the same field AES uses.
//!
//! Multiplication and division go through log/exp lookup tables. The
//! generator is 3 (0x03), which cycles through all 255 nonzero elements.
//! Both tables are built by `const fn` at compile time, so there is nothing
//! to initialize at runtime and nothing to race on.

use super::FieldError;

/// Irreducible polynomial: x^8 + x^4 + x^3 + x + 1.
pub const MODULUS: u16 = 0x11B;

/// Generator of the multiplicative group.
pub const GENERATOR: u8 = 0x03;

/// Order of the multiplicative group.
const ORDER: usize = 255;

/// EXP[i] = g^(i mod 255). Doubled (and then some) so that the sum of two
/// logs indexes directly without a modular reduction.
const fn build_exp_table() -> [u8; 512] {
    let mut table = [0u8; 512];
    let mut val: u16 = 1;
    let mut i = 0;
    while i < ORDER {
        table[i] = val as u8;
        // val * 3 = val * 2 + val
        val = (val << 1) ^ val;
        if val >= 256 {
            val ^= MODULUS;
        }
        i += 1;
    }
    while i < 512 {
        table[i] = table[i - ORDER];
        i += 1;
    }
    table
}

/// LOG[EXP[i]] = i for i in 0..255. LOG[0] is meaningless and never read.
const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < ORDER {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

static EXP: [u8; 512] = build_exp_table();
static LOG: [u8; 256] = build_log_table();

/// g^power, for any power (reduced mod 255).
#[inline]
pub fn exp(power: usize) -> u8 {
    EXP[power % ORDER]
}

/// Discrete log of a nonzero element.
#[inline]
pub fn log(a: u8) -> Result<u8, FieldError> {
    if a == 0 {
        return Err(FieldError::NoInverse);
    }
    Ok(LOG[a as usize])
}

/// Addition is XOR.
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Subtraction is also XOR (characteristic 2).
#[inline]
pub fn sub(a: u8, b: u8) -> u8 {
    a ^ b
}

#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    EXP[LOG[a as usize] as usize + LOG[b as usize] as usize]
}

/// `a / b`. Fails on `b == 0`.
#[inline]
pub fn div(a: u8, b: u8) -> Result<u8, FieldError> {
    if b == 0 {
        return Err(FieldError::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    Ok(EXP[ORDER + LOG[a as usize] as usize - LOG[b as usize] as usize])
}

/// Multiplicative inverse. Fails on zero.
#[inline]
pub fn inv(a: u8) -> Result<u8, FieldError> {
    if a == 0 {
        return Err(FieldError::NoInverse);
    }
    Ok(EXP[ORDER - LOG[a as usize] as usize])
}
