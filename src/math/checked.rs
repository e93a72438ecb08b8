//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, SwapError>`](crate::error::SwapError) instead
//! of panicking on overflow, underflow, or division by zero.
//!
//! Every division truncates toward zero.
//!
//! # Examples
//!
//! ```
//! use ammswap::domain::Decimal;
//! use ammswap::math::CheckedArithmetic;
//!
//! let a = Decimal::from_int(100);
//! let b = Decimal::from_int(200);
//! assert_eq!(a.safe_add(&b), Ok(Decimal::from_int(300)));
//! ```

use crate::domain::Decimal;
use crate::error::SwapError;

/// Fixed-point arithmetic that reports failure as a [`SwapError`].
///
/// A zero divisor yields [`SwapError::DivisionByZero`]; any other
/// unrepresentable result yields [`SwapError::Overflow`].  Nothing
/// saturates or wraps.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, SwapError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Overflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, SwapError>;

    /// Checked multiplication, truncating the result.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_mul(&self, other: &Self) -> Result<Self, SwapError>;

    /// Checked division, truncating the result.
    ///
    /// # Errors
    ///
    /// - [`SwapError::DivisionByZero`] if `other` is zero.
    /// - [`SwapError::Overflow`] if the quotient is not representable.
    fn safe_quo(&self, other: &Self) -> Result<Self, SwapError>;

    /// Computes `self × mul / quo` with a single truncation at the end.
    ///
    /// # Errors
    ///
    /// - [`SwapError::DivisionByZero`] if `quo` is zero.
    /// - [`SwapError::Overflow`] if the result is not representable.
    fn safe_mul_and_quo(&self, mul: &Self, quo: &Self) -> Result<Self, SwapError>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, SwapError> {
        self.checked_add(other)
            .ok_or(SwapError::Overflow("decimal addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, SwapError> {
        self.checked_sub(other)
            .ok_or(SwapError::Overflow("decimal subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, SwapError> {
        self.mul_truncate(other)
            .ok_or(SwapError::Overflow("decimal multiplication overflow"))
    }

    fn safe_quo(&self, other: &Self) -> Result<Self, SwapError> {
        if other.is_zero() {
            return Err(SwapError::DivisionByZero);
        }
        self.quo_truncate(other)
            .ok_or(SwapError::Overflow("decimal division overflow"))
    }

    fn safe_mul_and_quo(&self, mul: &Self, quo: &Self) -> Result<Self, SwapError> {
        if quo.is_zero() {
            return Err(SwapError::DivisionByZero);
        }
        self.mul_and_quo(mul, quo)
            .ok_or(SwapError::Overflow("decimal mul-and-quo overflow"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        let Ok(d) = s.parse::<Decimal>() else {
            panic!("valid decimal literal: {s}");
        };
        d
    }

    // -- safe_add -------------------------------------------------------

    #[test]
    fn add_ok() {
        let Ok(r) = dec("1.5").safe_add(&dec("2.25")) else {
            panic!("expected Ok");
        };
        assert_eq!(r, dec("3.75"));
    }

    #[test]
    fn add_overflow() {
        let Err(SwapError::Overflow(_)) = Decimal::MAX.safe_add(&Decimal::SMALLEST) else {
            panic!("expected Overflow");
        };
    }

    // -- safe_sub -------------------------------------------------------

    #[test]
    fn sub_ok() {
        let Ok(r) = dec("3").safe_sub(&dec("0.5")) else {
            panic!("expected Ok");
        };
        assert_eq!(r, dec("2.5"));
    }

    #[test]
    fn sub_underflow() {
        let Err(SwapError::Overflow(_)) = dec("1").safe_sub(&dec("2")) else {
            panic!("expected Overflow");
        };
    }

    // -- safe_mul -------------------------------------------------------

    #[test]
    fn mul_truncates() {
        // 0.00000003 * 0.5 = 0.000000015 -> 0.00000001
        let Ok(r) = dec("0.00000003").safe_mul(&dec("0.5")) else {
            panic!("expected Ok");
        };
        assert_eq!(r, dec("0.00000001"));
    }

    #[test]
    fn mul_overflow() {
        let Err(SwapError::Overflow(_)) = Decimal::MAX.safe_mul(&dec("2")) else {
            panic!("expected Overflow");
        };
    }

    // -- safe_quo -------------------------------------------------------

    #[test]
    fn quo_truncates() {
        let Ok(r) = dec("1").safe_quo(&dec("3")) else {
            panic!("expected Ok");
        };
        assert_eq!(r, dec("0.33333333"));
    }

    #[test]
    fn quo_by_zero() {
        let Err(SwapError::DivisionByZero) = dec("1").safe_quo(&Decimal::ZERO) else {
            panic!("expected DivisionByZero");
        };
    }

    // -- safe_mul_and_quo -----------------------------------------------

    #[test]
    fn mul_and_quo_single_truncation() {
        // 2 * 1 / 3 computed as one step: 0.66666666
        let Ok(r) = dec("2").safe_mul_and_quo(&dec("1"), &dec("3")) else {
            panic!("expected Ok");
        };
        assert_eq!(r, dec("0.66666666"));
    }

    #[test]
    fn mul_and_quo_by_zero() {
        let Err(SwapError::DivisionByZero) = dec("2").safe_mul_and_quo(&dec("1"), &Decimal::ZERO)
        else {
            panic!("expected DivisionByZero");
        };
    }

    // -- chaining -------------------------------------------------------

    #[test]
    fn chaining_works() {
        // (100 + 200) * 3 - 100 = 800
        let result = Decimal::from_int(100)
            .safe_add(&Decimal::from_int(200))
            .and_then(|v| v.safe_mul(&Decimal::from_int(3)))
            .and_then(|v| v.safe_sub(&Decimal::from_int(100)));
        let Ok(r) = result else {
            panic!("expected Ok");
        };
        assert_eq!(r, Decimal::from_int(800));
    }
}
