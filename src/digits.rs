//! Arbitrary-radix digit decoding.
//!
//! Share values arrive as digit strings in a radix between 2 and 36. Decoding
//! produces an exact [`BigInt`] so long digit strings never overflow.

use crate::{config, Result, ShareRecoveryError};
use num_bigint::BigInt;
use num_traits::Zero;

/// Maps a single character to its digit value, case-insensitively.
///
/// `'0'..='9'` map to 0-9 and `'a'..='z'` / `'A'..='Z'` map to 10-35.
/// Any other character has no value.
pub fn digit_value(c: char) -> Option<u32> {
    c.to_digit(36)
}

/// Checks that `base` lies within the supported radix range.
pub fn validate_base(base: u32) -> Result<u32> {
    if (config::MIN_BASE..=config::MAX_BASE).contains(&base) {
        Ok(base)
    } else {
        Err(ShareRecoveryError::InvalidBase {
            base: base.to_string(),
        })
    }
}

/// Decodes `digits` as a number written in `base`.
///
/// Accumulates left to right as `result = result * base + digit`. No
/// whitespace is trimmed and the empty string decodes to zero.
///
/// # Errors
///
/// Returns `InvalidBase` for a radix outside `[2, 36]` and `InvalidDigit`
/// for the first character whose value is not below `base`.
///
/// # Example
///
/// ```rust
/// use kontor_shamir::digits::decode_digits;
/// use num_bigint::BigInt;
///
/// assert_eq!(decode_digits("213", 4)?, BigInt::from(39));
/// assert!(decode_digits("2", 2).is_err());
/// # Ok::<(), kontor_shamir::ShareRecoveryError>(())
/// ```
pub fn decode_digits(digits: &str, base: u32) -> Result<BigInt> {
    let base = validate_base(base)?;
    let mut result = BigInt::zero();
    for c in digits.chars() {
        let d = match digit_value(c) {
            Some(d) if d < base => d,
            _ => return Err(ShareRecoveryError::InvalidDigit { digit: c, base }),
        };
        result = result * base + d;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_weighting() {
        assert_eq!(decode_digits("213", 4).unwrap(), BigInt::from(39));
        assert_eq!(decode_digits("111", 2).unwrap(), BigInt::from(7));
        assert_eq!(decode_digits("12", 10).unwrap(), BigInt::from(12));
    }

    #[test]
    fn test_letters_are_case_insensitive() {
        assert_eq!(decode_digits("ff", 16).unwrap(), BigInt::from(255));
        assert_eq!(decode_digits("FF", 16).unwrap(), BigInt::from(255));
        assert_eq!(decode_digits("zZ", 36).unwrap(), BigInt::from(35 * 36 + 35));
    }

    #[test]
    fn test_digit_equal_to_base_is_rejected() {
        assert_eq!(
            decode_digits("2", 2).unwrap_err(),
            ShareRecoveryError::InvalidDigit { digit: '2', base: 2 }
        );
        assert_eq!(
            decode_digits("1g", 16).unwrap_err(),
            ShareRecoveryError::InvalidDigit { digit: 'g', base: 16 }
        );
    }

    #[test]
    fn test_non_alphanumeric_is_rejected() {
        // whitespace is not trimmed
        assert!(matches!(
            decode_digits(" 1", 10),
            Err(ShareRecoveryError::InvalidDigit { digit: ' ', .. })
        ));
        assert!(matches!(
            decode_digits("-1", 10),
            Err(ShareRecoveryError::InvalidDigit { digit: '-', .. })
        ));
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(decode_digits("", 7).unwrap(), BigInt::zero());
    }

    #[test]
    fn test_base_out_of_range() {
        assert!(matches!(
            decode_digits("0", 1),
            Err(ShareRecoveryError::InvalidBase { .. })
        ));
        assert!(matches!(
            decode_digits("0", 37),
            Err(ShareRecoveryError::InvalidBase { .. })
        ));
    }

    #[test]
    fn test_exceeds_u64_without_overflow() {
        // 2^64 in binary is a one followed by 64 zeros
        let digits = format!("1{}", "0".repeat(64));
        let expected = BigInt::from(u64::MAX) + 1u32;
        assert_eq!(decode_digits(&digits, 2).unwrap(), expected);

        let long = "9".repeat(60);
        assert_eq!(
            decode_digits(&long, 10).unwrap().to_string(),
            long,
            "decimal digits must survive unchanged"
        );
    }
}
