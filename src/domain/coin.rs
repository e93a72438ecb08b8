//! A denominated amount and coin-list canonicalization.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Decimal, Denom};

/// An amount of a single token.
///
/// # Examples
///
/// ```
/// use ammswap::domain::{Coin, Decimal, Denom};
///
/// let c = Coin::new(Denom::new("okt").expect("valid"), Decimal::from_int(5));
/// assert_eq!(c.to_string(), "5.00000000okt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Token denomination.
    pub denom: Denom,
    /// Amount held or moved.
    pub amount: Decimal,
}

impl Coin {
    /// Creates a coin.
    #[must_use]
    pub const fn new(denom: Denom, amount: Decimal) -> Self {
        Self { denom, amount }
    }

    /// A coin of `denom` with zero amount.
    #[must_use]
    pub const fn zero(denom: Denom) -> Self {
        Self {
            denom,
            amount: Decimal::ZERO,
        }
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Adds `amount` to this coin.  Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, amount: &Decimal) -> Option<Self> {
        self.amount
            .checked_add(amount)
            .map(|a| Self::new(self.denom.clone(), a))
    }

    /// Subtracts `amount` from this coin.  Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, amount: &Decimal) -> Option<Self> {
        self.amount
            .checked_sub(amount)
            .map(|a| Self::new(self.denom.clone(), a))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Drops non-positive coins and sorts the rest by denomination.
///
/// The ledger expects coin lists in this canonical form.  Duplicate
/// denominations are not merged; callers never pass two coins of the
/// same denomination.
///
/// # Examples
///
/// ```
/// use ammswap::domain::{canonicalize_coins, Coin, Decimal, Denom};
///
/// let okt = Coin::new(Denom::new("okt").expect("valid"), Decimal::from_int(1));
/// let btc = Coin::new(Denom::new("btc").expect("valid"), Decimal::ZERO);
/// let out = canonicalize_coins([okt.clone(), btc]);
/// assert_eq!(out, vec![okt]);
/// ```
#[must_use]
pub fn canonicalize_coins(coins: impl IntoIterator<Item = Coin>) -> Vec<Coin> {
    let mut out: Vec<Coin> = coins.into_iter().filter(Coin::is_positive).collect();
    out.sort_by(|a, b| a.denom.cmp(&b.denom));
    out
}
