//! Account ledger collaborator.
//!
//! The engine holds no balances.  Every movement of coins, including
//! share-token mint and burn, goes through a [`Ledger`] supplied by the
//! host.  Coin slices passed to the ledger are always canonical: positive
//! amounts, sorted by denomination, no duplicates (see
//! [`canonicalize_coins`](crate::domain::canonicalize_coins)).
//!
//! Each call is atomic: on `Err` the ledger must not have moved any coin.

use crate::domain::{AccountId, Coin, Decimal, Denom};

/// Errors reported by a [`Ledger`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// `account` holds less than `needed` of `denom`.
    #[error("account {account} has {available}{denom}, needs {needed}{denom}")]
    InsufficientFunds {
        /// Account that was debited.
        account: AccountId,
        /// Token that ran short.
        denom: Denom,
        /// Amount the operation required.
        needed: Decimal,
        /// Amount actually held.
        available: Decimal,
    },

    /// The ledger refused the operation for another reason.
    #[error("{0}")]
    Rejected(String),
}

/// Multi-asset account ledger.
///
/// # Errors
///
/// Every mutating method returns [`LedgerError`] and leaves balances
/// untouched on failure.
pub trait Ledger {
    /// Balance of `denom` held by `account`; zero if none.
    fn balance_of(&self, account: &AccountId, denom: &Denom) -> Decimal;

    /// Moves `coins` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientFunds`] if `from` cannot cover any coin.
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        coins: &[Coin],
    ) -> Result<(), LedgerError>;

    /// Creates `coins` and credits them to `to`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Rejected`] if minting is not permitted.
    fn mint(&mut self, to: &AccountId, coins: &[Coin]) -> Result<(), LedgerError>;

    /// Debits `coins` from `from` and destroys them.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientFunds`] if `from` cannot cover any coin.
    fn burn(&mut self, from: &AccountId, coins: &[Coin]) -> Result<(), LedgerError>;
}
