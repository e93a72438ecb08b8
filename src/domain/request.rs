//! Requests accepted by the engine.
//!
//! [`Request`] is a closed set: the dispatcher matches on it exhaustively.
//! Each variant carries a struct with public fields and a stateless
//! `validate_basic` that runs before any pool is looked up.

use serde::{Deserialize, Serialize};

use super::{AccountId, Coin, Decimal, Denom, PairId, Timestamp};
use crate::error::SwapError;

/// Create an empty pool pairing `token` with the native token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePool {
    /// The non-native token of the new pool.
    pub token: Denom,
}

impl CreatePool {
    /// Stateless checks.
    ///
    /// # Errors
    ///
    /// [`SwapError::Validation`] if `token` is the native token.
    pub fn validate_basic(&self, native: &Denom) -> Result<(), SwapError> {
        if &self.token == native {
            return Err(SwapError::validation(format!(
                "cannot create a pool for the native token {native}"
            )));
        }
        Ok(())
    }
}

/// Deposit native and base tokens in exchange for pool shares.
///
/// The pool is the one for `max_base_amount.denom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidity {
    /// Account paying the deposit and receiving the shares.
    pub sender: AccountId,
    /// Native tokens to deposit.
    pub quote_amount: Coin,
    /// Upper bound on the base tokens taken.  On the first deposit the
    /// whole amount is used.
    pub max_base_amount: Coin,
    /// Lower bound on the shares minted.
    pub min_liquidity: Decimal,
    /// Latest acceptable block time.
    pub deadline: Timestamp,
}

impl AddLiquidity {
    /// Stateless checks.
    ///
    /// # Errors
    ///
    /// [`SwapError::Validation`] on an empty sender, non-positive amounts,
    /// or misplaced denominations.
    pub fn validate_basic(&self, native: &Denom) -> Result<(), SwapError> {
        require_account(&self.sender, "sender")?;
        if &self.quote_amount.denom != native {
            return Err(SwapError::validation(format!(
                "quote amount must be in {native}, got {}",
                self.quote_amount.denom
            )));
        }
        if &self.max_base_amount.denom == native {
            return Err(SwapError::validation(
                "max base amount must not be the native token",
            ));
        }
        if !self.quote_amount.is_positive() || !self.max_base_amount.is_positive() {
            return Err(SwapError::validation(
                "quote amount and max base amount must be positive",
            ));
        }
        Ok(())
    }

    /// The pool this request targets.
    #[must_use]
    pub fn pair_id(&self, native: &Denom) -> PairId {
        PairId::new(&self.max_base_amount.denom, native)
    }
}

/// Burn pool shares in exchange for a proportional share of reserves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLiquidity {
    /// Account burning shares and receiving the reserves.
    pub sender: AccountId,
    /// The pool to withdraw from.
    pub pool_id: PairId,
    /// Shares to burn.
    pub liquidity_amount: Decimal,
    /// Lower bound on the base tokens returned.
    pub min_base_amount: Coin,
    /// Lower bound on the native tokens returned.
    pub min_quote_amount: Coin,
    /// Latest acceptable block time.
    pub deadline: Timestamp,
}

impl RemoveLiquidity {
    /// Stateless checks.
    ///
    /// # Errors
    ///
    /// [`SwapError::Validation`] on an empty sender, zero liquidity, or
    /// bounds whose denominations do not match `pool_id`.
    pub fn validate_basic(&self, native: &Denom) -> Result<(), SwapError> {
        require_account(&self.sender, "sender")?;
        if !self.liquidity_amount.is_positive() {
            return Err(SwapError::validation("liquidity amount must be positive"));
        }
        if &self.min_quote_amount.denom != native {
            return Err(SwapError::validation(format!(
                "min quote amount must be in {native}"
            )));
        }
        if PairId::new(&self.min_base_amount.denom, native) != self.pool_id {
            return Err(SwapError::validation(format!(
                "min base amount denom {} does not match pool {}",
                self.min_base_amount.denom, self.pool_id
            )));
        }
        Ok(())
    }
}

/// Sell one token for another, directly or through the native token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    /// Account paying `sold_amount`.
    pub sender: AccountId,
    /// Account receiving the bought tokens.
    pub recipient: AccountId,
    /// Tokens to sell.
    pub sold_amount: Coin,
    /// Lower bound on the tokens bought.
    pub min_bought_amount: Decimal,
    /// Token to buy.
    pub bought_denom: Denom,
    /// Latest acceptable block time.
    pub deadline: Timestamp,
}

impl Swap {
    /// Stateless checks.
    ///
    /// # Errors
    ///
    /// [`SwapError::Validation`] on empty accounts, a non-positive sold
    /// amount, or identical sold and bought tokens.
    pub fn validate_basic(&self) -> Result<(), SwapError> {
        require_account(&self.sender, "sender")?;
        require_account(&self.recipient, "recipient")?;
        if !self.sold_amount.is_positive() {
            return Err(SwapError::validation("sold amount must be positive"));
        }
        if self.sold_amount.denom == self.bought_denom {
            return Err(SwapError::validation(format!(
                "cannot swap {} for itself",
                self.bought_denom
            )));
        }
        Ok(())
    }
}

/// Every request the engine accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    /// See [`CreatePool`].
    CreatePool(CreatePool),
    /// See [`AddLiquidity`].
    AddLiquidity(AddLiquidity),
    /// See [`RemoveLiquidity`].
    RemoveLiquidity(RemoveLiquidity),
    /// See [`Swap`].
    Swap(Swap),
}

impl Request {
    /// Short name used in logs and events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreatePool(_) => "create_pool",
            Self::AddLiquidity(_) => "add_liquidity",
            Self::RemoveLiquidity(_) => "remove_liquidity",
            Self::Swap(_) => "swap",
        }
    }

    /// Runs the variant's stateless checks.
    ///
    /// # Errors
    ///
    /// [`SwapError::Validation`] from the variant's `validate_basic`.
    pub fn validate_basic(&self, native: &Denom) -> Result<(), SwapError> {
        match self {
            Self::CreatePool(r) => r.validate_basic(native),
            Self::AddLiquidity(r) => r.validate_basic(native),
            Self::RemoveLiquidity(r) => r.validate_basic(native),
            Self::Swap(r) => r.validate_basic(),
        }
    }
}

fn require_account(account: &AccountId, role: &str) -> Result<(), SwapError> {
    if account.is_empty() {
        return Err(SwapError::validation(format!("{role} must not be empty")));
    }
    Ok(())
}
