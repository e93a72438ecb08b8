//! Unsigned fixed-point decimal with eight fractional digits.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SwapError;
use crate::math::mul_div_floor;

/// Number of fractional digits carried by every [`Decimal`].
pub const PRECISION: u32 = 8;

/// Raw units per whole token (`10^PRECISION`).
pub const SCALE: u128 = 100_000_000;

/// An unsigned decimal stored as a raw `u128` scaled by `10^8`.
///
/// All arithmetic is checked and returns `None` on overflow, underflow or
/// division by zero.  Every division truncates toward zero, so results
/// are identical on every machine.
///
/// The textual form is `"<int>[.<frac>]"` with at most eight fractional
/// digits; [`Display`](fmt::Display) always prints all eight.
///
/// # Examples
///
/// ```
/// use ammswap::domain::Decimal;
///
/// let a: Decimal = "1.5".parse().expect("valid");
/// let b = Decimal::from_int(2);
/// assert_eq!(a.mul_truncate(&b), Some(Decimal::from_int(3)));
/// assert_eq!(a.to_string(), "1.50000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Decimal(u128);

impl Decimal {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One whole unit.
    pub const ONE: Self = Self(SCALE);

    /// The smallest positive value, `0.00000001`.
    pub const SMALLEST: Self = Self(1);

    /// Largest representable value.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw scaled value.
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Returns the raw scaled value.
    #[must_use]
    pub const fn raw(&self) -> u128 {
        self.0
    }

    /// Creates a decimal from a whole number.  Cannot overflow.
    pub const fn from_int(value: u64) -> Self {
        Self(value as u128 * SCALE)
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the value is strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` if the result would be negative.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// `self × other`, truncated to eight fractional digits.
    #[must_use]
    pub fn mul_truncate(&self, other: &Self) -> Option<Self> {
        mul_div_floor(self.0, other.0, SCALE).map(Self)
    }

    /// `self / other`, truncated.  Returns `None` if `other` is zero.
    #[must_use]
    pub fn quo_truncate(&self, other: &Self) -> Option<Self> {
        mul_div_floor(self.0, SCALE, other.0).map(Self)
    }

    /// `self × mul / quo` with the product formed first and a single
    /// truncation at the end.
    ///
    /// This is the formula every pricing and share computation uses.  On
    /// raw values it is exactly `A × B / C`.
    #[must_use]
    pub fn mul_and_quo(&self, mul: &Self, quo: &Self) -> Option<Self> {
        mul_div_floor(self.0, mul.0, quo.0).map(Self)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:08}", self.0 / SCALE, self.0 % SCALE)
    }
}

impl FromStr for Decimal {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SwapError::Validation(format!("malformed decimal '{s}'")));
        }
        if s.contains('.') && frac_part.is_empty() {
            return Err(SwapError::Validation(format!("malformed decimal '{s}'")));
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SwapError::Validation(format!("malformed decimal '{s}'")));
        }
        if frac_part.len() > PRECISION as usize {
            return Err(SwapError::Validation(format!(
                "decimal '{s}' has more than {PRECISION} fractional digits"
            )));
        }

        let whole: u128 = int_part
            .parse()
            .map_err(|_| SwapError::Validation(format!("decimal '{s}' out of range")))?;
        let mut frac: u128 = 0;
        for b in frac_part.bytes() {
            frac = frac * 10 + u128::from(b - b'0');
        }
        // pad to eight digits
        for _ in frac_part.len()..PRECISION as usize {
            frac *= 10;
        }

        whole
            .checked_mul(SCALE)
            .and_then(|w| w.checked_add(frac))
            .map(Self)
            .ok_or_else(|| SwapError::Validation(format!("decimal '{s}' out of range")))
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
