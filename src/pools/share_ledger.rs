//! Total supply of each pool's share token.

use std::collections::BTreeMap;

use crate::domain::{Decimal, Denom, ShareToken};
use crate::error::SwapError;
use crate::math::CheckedArithmetic;

/// Share tokens created by the engine and their outstanding supply.
///
/// Holder balances are not tracked here; they live in the external
/// ledger.  Supply changes only through [`record_mint`](Self::record_mint)
/// and [`record_burn`](Self::record_burn).
#[derive(Debug, Clone, Default)]
pub struct PoolShareLedger {
    tokens: BTreeMap<Denom, ShareToken>,
}

impl PoolShareLedger {
    /// An empty share ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new share token with zero supply.
    ///
    /// # Errors
    ///
    /// [`SwapError::AlreadyExists`] if `id` is already registered.
    pub fn create(&mut self, id: Denom) -> Result<(), SwapError> {
        if self.tokens.contains_key(&id) {
            return Err(SwapError::AlreadyExists(format!("share token {id}")));
        }
        self.tokens.insert(id.clone(), ShareToken::new(id));
        Ok(())
    }

    /// Returns `true` if `id` is a share token of this engine.
    #[must_use]
    pub fn contains(&self, id: &Denom) -> bool {
        self.tokens.contains_key(id)
    }

    /// The share token registered as `id`.
    ///
    /// # Errors
    ///
    /// [`SwapError::NotFound`] if there is none.
    pub fn get(&self, id: &Denom) -> Result<&ShareToken, SwapError> {
        self.tokens
            .get(id)
            .ok_or_else(|| SwapError::NotFound(format!("share token {id}")))
    }

    /// Outstanding supply of `id`.
    ///
    /// # Errors
    ///
    /// [`SwapError::NotFound`] if `id` is not registered.
    pub fn total_supply(&self, id: &Denom) -> Result<Decimal, SwapError> {
        self.get(id).map(|t| t.total_supply)
    }

    /// Adds `amount` to the supply of `id`; returns the new supply.
    ///
    /// # Errors
    ///
    /// [`SwapError::NotFound`] or [`SwapError::Overflow`].
    pub fn record_mint(&mut self, id: &Denom, amount: &Decimal) -> Result<Decimal, SwapError> {
        let token = self.get_mut(id)?;
        token.total_supply = token.total_supply.safe_add(amount)?;
        Ok(token.total_supply)
    }

    /// Removes `amount` from the supply of `id`; returns the new supply.
    ///
    /// # Errors
    ///
    /// [`SwapError::NotFound`], or [`SwapError::Overflow`] if `amount`
    /// exceeds the supply.
    pub fn record_burn(&mut self, id: &Denom, amount: &Decimal) -> Result<Decimal, SwapError> {
        let token = self.get_mut(id)?;
        token.total_supply = token.total_supply.safe_sub(amount)?;
        Ok(token.total_supply)
    }

    fn get_mut(&mut self, id: &Denom) -> Result<&mut ShareToken, SwapError> {
        self.tokens
            .get_mut(id)
            .ok_or_else(|| SwapError::NotFound(format!("share token {id}")))
    }
}
