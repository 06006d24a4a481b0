//! Big-integer helpers shared by the drivers
//!
//! Literal parsing (decimal, `0x` hexadecimal, `2^K`), hexadecimal rendering,
//! power-of-two tests and logarithms of integers too large for `f64`.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, ToPrimitive, Zero};

use crate::error::{Result, SpectralError};

/// Largest bit length converted to `f64` directly before switching to a
/// shifted mantissa.
const F64_SAFE_BITS: u64 = 1000;

/// Largest exponent accepted in `2^K` literals
pub const MAX_POWER: u64 = 1 << 24;

/// Parse a non-negative integer literal.
///
/// Accepted forms: decimal digits, `0x`/`0X` followed by hex digits, or `2^K`
/// where `K` is a decimal or hexadecimal exponent in [1, `MAX_POWER`].
pub fn parse_integer(s: &str) -> Result<BigUint> {
    if let Some(exp) = s.strip_prefix("2^") {
        return match parse_u64(exp) {
            Some(p) if p > 0 && p <= MAX_POWER => Ok(BigUint::one() << p),
            _ => Err(SpectralError::InvalidPower(exp.to_string())),
        };
    }

    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SpectralError::InvalidHexadecimal(s.to_string()));
        }
        return BigUint::parse_bytes(digits.as_bytes(), 16)
            .ok_or_else(|| SpectralError::InvalidHexadecimal(s.to_string()));
    }

    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SpectralError::InvalidDecimal(s.to_string()));
    }
    BigUint::parse_bytes(s.as_bytes(), 10).ok_or_else(|| SpectralError::InvalidDecimal(s.to_string()))
}

/// Parse a 64-bit seed in decimal or `0x` hexadecimal.
///
/// A leading `-` is accepted and wraps modulo 2^64.
pub fn parse_seed(s: &str) -> Result<u64> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let value = parse_u64(body).ok_or_else(|| SpectralError::Unreadable {
        what: "seed",
        value: s.to_string(),
    })?;
    Ok(if negative { value.wrapping_neg() } else { value })
}

/// Parse a signed 64-bit integer in decimal or `0x` hexadecimal.
///
/// `what` names the quantity in the error message.
pub fn parse_signed(s: &str, what: &'static str) -> Result<i64> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let magnitude = parse_u64(body).map(i128::from);
    let value = magnitude.and_then(|m| i64::try_from(if negative { -m } else { m }).ok());
    value.ok_or_else(|| SpectralError::Unreadable {
        what,
        value: s.to_string(),
    })
}

fn parse_u64(s: &str) -> Option<u64> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Lowercase hexadecimal digits without prefix or leading zeros.
pub fn to_hex(x: &BigUint) -> String {
    format!("{:x}", x)
}

/// True iff `x` is a (positive) power of two.
pub fn is_power_of_two(x: &BigUint) -> bool {
    if x.is_zero() {
        return false;
    }
    let pred = x - BigUint::one();
    (x & &pred).is_zero()
}

/// Natural logarithm of a non-negative integer of any size.
///
/// Returns `-inf` for zero.
pub fn ln(x: &BigUint) -> f64 {
    let bits = x.bits();
    if bits == 0 {
        return f64::NEG_INFINITY;
    }
    if bits <= F64_SAFE_BITS {
        return x.to_f64().map_or(f64::NAN, f64::ln);
    }
    let shift = bits - 64;
    let top = (x >> shift).to_f64().unwrap_or(f64::NAN);
    top.ln() + shift as f64 * std::f64::consts::LN_2
}

/// Natural logarithm of `|x|`.
pub fn ln_abs(x: &BigInt) -> f64 {
    ln(x.magnitude())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_integer("12345").unwrap(), BigUint::from(12345u32));
        assert_eq!(parse_integer("0xFF").unwrap(), BigUint::from(255u32));
        assert_eq!(parse_integer("0Xd1342543de82ef95").unwrap(), BigUint::from(0xd1342543de82ef95u64));
        assert_eq!(parse_integer("2^64").unwrap(), BigUint::one() << 64);
        assert_eq!(parse_integer("2^0x10").unwrap(), BigUint::from(65536u32));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_integer("12a"), Err(SpectralError::InvalidDecimal(_))));
        assert!(matches!(parse_integer(""), Err(SpectralError::InvalidDecimal(_))));
        assert!(matches!(parse_integer("0xfg"), Err(SpectralError::InvalidHexadecimal(_))));
        assert!(matches!(parse_integer("0x1_0"), Err(SpectralError::InvalidHexadecimal(_))));
        assert!(matches!(parse_integer("2^0"), Err(SpectralError::InvalidPower(_))));
        assert!(matches!(parse_integer("2^x"), Err(SpectralError::InvalidPower(_))));
        assert!(matches!(
            parse_integer("2^99999999999"),
            Err(SpectralError::InvalidPower(_))
        ));
        assert_eq!(parse_integer("2^16777216").unwrap().bits(), MAX_POWER + 1);
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("42").unwrap(), 42);
        assert_eq!(parse_seed("0x2a").unwrap(), 42);
        assert_eq!(parse_seed("-1").unwrap(), u64::MAX);
        assert!(parse_seed("forty-two").is_err());
    }

    #[test]
    fn test_parse_signed() {
        assert_eq!(parse_signed("24", "dimension").unwrap(), 24);
        assert_eq!(parse_signed("0x18", "dimension").unwrap(), 24);
        assert_eq!(parse_signed("-0x10", "iterations").unwrap(), -16);
        assert_eq!(parse_signed("-9223372036854775808", "iterations").unwrap(), i64::MIN);
        assert!(parse_signed("9223372036854775808", "iterations").is_err());

        let err = parse_signed("ten", "maximum dimension").unwrap_err();
        assert_eq!(err.to_string(), "Unreadable maximum dimension: ten");
    }

    #[test]
    fn test_power_of_two() {
        assert!(is_power_of_two(&BigUint::one()));
        assert!(is_power_of_two(&(BigUint::one() << 128)));
        assert!(!is_power_of_two(&BigUint::zero()));
        assert!(!is_power_of_two(&BigUint::from(12u32)));
    }

    #[test]
    fn test_hex() {
        assert_eq!(to_hex(&BigUint::from(0xdeadbeefu32)), "deadbeef");
    }

    #[test]
    fn test_ln_large_values() {
        let small = BigUint::from(1000u32);
        assert!((ln(&small) - 1000f64.ln()).abs() < 1e-12);

        // 2^4000 is far outside f64 range
        let huge = BigUint::one() << 4000;
        let expected = 4000.0 * std::f64::consts::LN_2;
        assert!((ln(&huge) - expected).abs() < 1e-6);

        assert_eq!(ln(&BigUint::zero()), f64::NEG_INFINITY);
        assert!((ln_abs(&BigInt::from(-1000)) - 1000f64.ln()).abs() < 1e-12);
    }
}
