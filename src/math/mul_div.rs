//! Widening multiply-then-divide for raw `u128` values.
//!
//! [`mul_div_floor`] is the low-level building block behind every
//! truncating operation on [`Decimal`](crate::domain::Decimal).  The
//! product is formed in 256 bits so that `a × b` never overflows before
//! the division, which keeps the multiply-before-divide ordering exact.
//!
//! # Examples
//!
//! ```
//! use ammswap::math::mul_div_floor;
//!
//! assert_eq!(mul_div_floor(10, 10, 3), Some(33));
//! assert_eq!(mul_div_floor(u128::MAX, 2, 2), Some(u128::MAX));
//! assert_eq!(mul_div_floor(1, 1, 0), None);
//! ```

use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer for intermediate products.
    pub struct U256(4);
}

/// Computes `⌊a × b / c⌋` with a 256-bit intermediate product.
///
/// Returns [`None`] if `c` is zero or if the quotient does not fit in
/// `u128`.
#[must_use]
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Option<u128> {
    if c == 0 {
        return None;
    }
    let quotient = U256::from(a) * U256::from(b) / U256::from(c);
    if quotient > U256::from(u128::MAX) {
        return None;
    }
    Some(quotient.as_u128())
}

/// Returns `a × b` as a [`U256`].  Cannot overflow.
#[must_use]
pub fn widening_mul(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_division() {
        assert_eq!(mul_div_floor(6, 4, 3), Some(8));
    }

    #[test]
    fn truncates_toward_zero() {
        // 7 * 3 / 2 = 10.5
        assert_eq!(mul_div_floor(7, 3, 2), Some(10));
        // 1 * 1 / 2 = 0.5
        assert_eq!(mul_div_floor(1, 1, 2), Some(0));
    }

    #[test]
    fn zero_divisor() {
        assert_eq!(mul_div_floor(5, 5, 0), None);
    }

    #[test]
    fn zero_numerator() {
        assert_eq!(mul_div_floor(0, u128::MAX, 7), Some(0));
    }

    #[test]
    fn intermediate_exceeds_u128() {
        // (2^128 - 1) * (2^128 - 1) / (2^128 - 1) = 2^128 - 1
        assert_eq!(mul_div_floor(u128::MAX, u128::MAX, u128::MAX), Some(u128::MAX));
    }

    #[test]
    fn quotient_overflow() {
        assert_eq!(mul_div_floor(u128::MAX, 2, 1), None);
    }

    #[test]
    fn widening_mul_matches_u128_when_small() {
        assert_eq!(widening_mul(1_000, 2_000), U256::from(2_000_000u64));
    }

    #[test]
    fn widening_mul_large() {
        let product = widening_mul(u128::MAX, 2);
        assert!(product > U256::from(u128::MAX));
    }
}
