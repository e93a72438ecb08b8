//! Pool reserve state and pair identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Coin, Decimal, Denom};
use crate::error::SwapError;

/// Identifier of a pool: `"<token>_<native>"`.
///
/// # Examples
///
/// ```
/// use ammswap::domain::{Denom, PairId};
///
/// let btc = Denom::new("btc").expect("valid");
/// let okt = Denom::new("okt").expect("valid");
/// assert_eq!(PairId::new(&btc, &okt).as_str(), "btc_okt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(String);

impl PairId {
    /// Builds the identifier of the pool pairing `token` with `native`.
    #[must_use]
    pub fn new(token: &Denom, native: &Denom) -> Self {
        Self(format!("{token}_{native}"))
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reserve state of one liquidity pool.
///
/// `base_reserve` holds the non-native token, `quote_reserve` the native
/// token.  A pool is either uninitialized (both reserves zero) or active
/// (both strictly positive); every transition method returns a new value
/// and rejects results that would break this.
///
/// Deserialization goes through [`Pool::from_parts`], so a stored
/// half-zero pool fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PoolRecord", into = "PoolRecord")]
pub struct Pool {
    pair_id: PairId,
    base_reserve: Coin,
    quote_reserve: Coin,
    share_token_id: Denom,
}

/// Stored form of a [`Pool`]; the pair identifier is derived on load.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PoolRecord {
    share_token_id: Denom,
    base_reserve: Coin,
    quote_reserve: Coin,
}

impl TryFrom<PoolRecord> for Pool {
    type Error = SwapError;

    fn try_from(record: PoolRecord) -> Result<Self, Self::Error> {
        Self::from_parts(record.base_reserve, record.quote_reserve, record.share_token_id)
    }
}

impl From<Pool> for PoolRecord {
    fn from(pool: Pool) -> Self {
        Self {
            base_reserve: pool.base_reserve,
            quote_reserve: pool.quote_reserve,
            share_token_id: pool.share_token_id,
        }
    }
}

impl Pool {
    /// Creates an uninitialized pool with zero reserves.
    #[must_use]
    pub fn new(base: Denom, native: Denom, share_token_id: Denom) -> Self {
        Self {
            pair_id: PairId::new(&base, &native),
            base_reserve: Coin::zero(base),
            quote_reserve: Coin::zero(native),
            share_token_id,
        }
    }

    /// Rebuilds a pool from stored parts, checking the reserve invariant.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Invariant`] if exactly one reserve is zero.
    pub fn from_parts(
        base_reserve: Coin,
        quote_reserve: Coin,
        share_token_id: Denom,
    ) -> Result<Self, SwapError> {
        let pool = Self {
            pair_id: PairId::new(&base_reserve.denom, &quote_reserve.denom),
            base_reserve,
            quote_reserve,
            share_token_id,
        };
        pool.check_invariant()?;
        Ok(pool)
    }

    /// Returns the pair identifier.
    #[must_use]
    pub const fn pair_id(&self) -> &PairId {
        &self.pair_id
    }

    /// Returns the reserve of the non-native token.
    #[must_use]
    pub const fn base_reserve(&self) -> &Coin {
        &self.base_reserve
    }

    /// Returns the reserve of the native token.
    #[must_use]
    pub const fn quote_reserve(&self) -> &Coin {
        &self.quote_reserve
    }

    /// Returns the denomination of the pool's share token.
    #[must_use]
    pub const fn share_token_id(&self) -> &Denom {
        &self.share_token_id
    }

    /// Returns the non-native denomination.
    #[must_use]
    pub const fn base_denom(&self) -> &Denom {
        &self.base_reserve.denom
    }

    /// Returns the native denomination.
    #[must_use]
    pub const fn quote_denom(&self) -> &Denom {
        &self.quote_reserve.denom
    }

    /// Both reserves are zero.
    #[must_use]
    pub const fn is_uninitialized(&self) -> bool {
        self.base_reserve.is_zero() && self.quote_reserve.is_zero()
    }

    /// Both reserves are strictly positive.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.base_reserve.is_positive() && self.quote_reserve.is_positive()
    }

    /// Checks that the pool is either uninitialized or active.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Invariant`] for a half-zero pool.
    pub fn check_invariant(&self) -> Result<(), SwapError> {
        if self.is_uninitialized() || self.is_active() {
            return Ok(());
        }
        Err(SwapError::Invariant(format!(
            "pool {} has reserves {} / {}",
            self.pair_id, self.base_reserve, self.quote_reserve
        )))
    }

    /// Returns the pool after depositing `base` and `quote`.
    ///
    /// # Errors
    ///
    /// [`SwapError::Overflow`] on reserve overflow, [`SwapError::Invariant`]
    /// if the result is half-zero.
    pub fn with_deposit(&self, base: &Decimal, quote: &Decimal) -> Result<Self, SwapError> {
        let base_reserve = self
            .base_reserve
            .checked_add(base)
            .ok_or(SwapError::Overflow("base reserve overflow"))?;
        let quote_reserve = self
            .quote_reserve
            .checked_add(quote)
            .ok_or(SwapError::Overflow("quote reserve overflow"))?;
        self.replace(base_reserve, quote_reserve)
    }

    /// Returns the pool after withdrawing `base` and `quote`.
    ///
    /// # Errors
    ///
    /// [`SwapError::Overflow`] if a reserve would go negative,
    /// [`SwapError::Invariant`] if the result is half-zero.
    pub fn with_withdrawal(&self, base: &Decimal, quote: &Decimal) -> Result<Self, SwapError> {
        let base_reserve = self
            .base_reserve
            .checked_sub(base)
            .ok_or(SwapError::Overflow("base reserve underflow"))?;
        let quote_reserve = self
            .quote_reserve
            .checked_sub(quote)
            .ok_or(SwapError::Overflow("quote reserve underflow"))?;
        self.replace(base_reserve, quote_reserve)
    }

    /// Returns the pool after a swap that took in `sold` and paid out
    /// `bought`.  `sold_is_quote` selects the direction.
    ///
    /// # Errors
    ///
    /// Same as [`with_deposit`](Self::with_deposit) and
    /// [`with_withdrawal`](Self::with_withdrawal).
    pub fn with_swap(
        &self,
        sold_is_quote: bool,
        sold: &Decimal,
        bought: &Decimal,
    ) -> Result<Self, SwapError> {
        let (base_reserve, quote_reserve) = if sold_is_quote {
            (
                self.base_reserve
                    .checked_sub(bought)
                    .ok_or(SwapError::Overflow("base reserve underflow"))?,
                self.quote_reserve
                    .checked_add(sold)
                    .ok_or(SwapError::Overflow("quote reserve overflow"))?,
            )
        } else {
            (
                self.base_reserve
                    .checked_add(sold)
                    .ok_or(SwapError::Overflow("base reserve overflow"))?,
                self.quote_reserve
                    .checked_sub(bought)
                    .ok_or(SwapError::Overflow("quote reserve underflow"))?,
            )
        };
        self.replace(base_reserve, quote_reserve)
    }

    fn replace(&self, base_reserve: Coin, quote_reserve: Coin) -> Result<Self, SwapError> {
        let next = Self {
            pair_id: self.pair_id.clone(),
            base_reserve,
            quote_reserve,
            share_token_id: self.share_token_id.clone(),
        };
        next.check_invariant()?;
        Ok(next)
    }
}
