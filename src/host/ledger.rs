//! In-memory [`Ledger`].

use std::collections::BTreeMap;

use tracing::trace;

use crate::domain::{AccountId, Coin, Decimal, Denom};
use crate::traits::{Ledger, LedgerError};

/// Balances keyed by `(account, denom)`.
///
/// Uses a `BTreeMap` so iteration order is deterministic.  Every mutating
/// call is all-or-nothing: new balances are computed first and written
/// only if every coin succeeds.
///
/// Mints, burns and transfers of one denomination can be switched off to
/// exercise the engine's handling of a ledger that fails after reserves
/// have moved.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    balances: BTreeMap<(AccountId, Denom), Decimal>,
    reject_mints: bool,
    reject_burns: bool,
    reject_transfers_of: Option<Denom>,
}

impl MemoryLedger {
    /// An empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `coin` to `account` out of thin air.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Rejected`] if the balance would overflow.
    pub fn fund(&mut self, account: &AccountId, coin: &Coin) -> Result<(), LedgerError> {
        let updates = self.credits(account, core::slice::from_ref(coin))?;
        self.apply(updates);
        Ok(())
    }

    /// Makes every later [`Ledger::mint`] fail.
    pub fn set_reject_mints(&mut self, reject: bool) {
        self.reject_mints = reject;
    }

    /// Makes every later [`Ledger::burn`] fail.
    pub fn set_reject_burns(&mut self, reject: bool) {
        self.reject_burns = reject;
    }

    /// Makes every later [`Ledger::transfer`] carrying `denom` fail.
    /// `None` lifts the restriction.
    pub fn set_reject_transfers_of(&mut self, denom: Option<Denom>) {
        self.reject_transfers_of = denom;
    }

    /// Sum of `denom` across all accounts.
    #[must_use]
    pub fn total_of(&self, denom: &Denom) -> Decimal {
        self.balances
            .iter()
            .filter(|((_, d), _)| d == denom)
            .fold(Decimal::ZERO, |acc, (_, v)| {
                acc.checked_add(v).unwrap_or(Decimal::MAX)
            })
    }

    fn debits(
        &self,
        account: &AccountId,
        coins: &[Coin],
    ) -> Result<Vec<((AccountId, Denom), Decimal)>, LedgerError> {
        coins
            .iter()
            .map(|coin| {
                let available = self.balance_of(account, &coin.denom);
                let remaining = available.checked_sub(&coin.amount).ok_or_else(|| {
                    LedgerError::InsufficientFunds {
                        account: account.clone(),
                        denom: coin.denom.clone(),
                        needed: coin.amount,
                        available,
                    }
                })?;
                Ok(((account.clone(), coin.denom.clone()), remaining))
            })
            .collect()
    }

    fn credits(
        &self,
        account: &AccountId,
        coins: &[Coin],
    ) -> Result<Vec<((AccountId, Denom), Decimal)>, LedgerError> {
        coins
            .iter()
            .map(|coin| {
                let next = self
                    .balance_of(account, &coin.denom)
                    .checked_add(&coin.amount)
                    .ok_or_else(|| {
                        LedgerError::Rejected(format!("balance overflow for {account}"))
                    })?;
                Ok(((account.clone(), coin.denom.clone()), next))
            })
            .collect()
    }

    fn apply(&mut self, updates: Vec<((AccountId, Denom), Decimal)>) {
        for (key, value) in updates {
            if value.is_zero() {
                self.balances.remove(&key);
            } else {
                self.balances.insert(key, value);
            }
        }
    }
}

impl Ledger for MemoryLedger {
    fn balance_of(&self, account: &AccountId, denom: &Denom) -> Decimal {
        self.balances
            .get(&(account.clone(), denom.clone()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        coins: &[Coin],
    ) -> Result<(), LedgerError> {
        if let Some(blocked) = &self.reject_transfers_of {
            if coins.iter().any(|c| &c.denom == blocked) {
                return Err(LedgerError::Rejected(format!("transfers of {blocked} disabled")));
            }
        }
        if from == to {
            // still require the funds to exist
            self.debits(from, coins)?;
            return Ok(());
        }
        let debits = self.debits(from, coins)?;
        let credits = self.credits(to, coins)?;
        self.apply(debits);
        self.apply(credits);
        trace!(%from, %to, coins = coins.len(), "transfer");
        Ok(())
    }

    fn mint(&mut self, to: &AccountId, coins: &[Coin]) -> Result<(), LedgerError> {
        if self.reject_mints {
            return Err(LedgerError::Rejected("minting disabled".into()));
        }
        let credits = self.credits(to, coins)?;
        self.apply(credits);
        Ok(())
    }

    fn burn(&mut self, from: &AccountId, coins: &[Coin]) -> Result<(), LedgerError> {
        if self.reject_burns {
            return Err(LedgerError::Rejected("burning disabled".into()));
        }
        let debits = self.debits(from, coins)?;
        self.apply(debits);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn coin(d: &str, amount: u64) -> Coin {
        let Ok(denom) = Denom::new(d) else {
            panic!("valid denom");
        };
        Coin::new(denom, Decimal::from_int(amount))
    }

    fn funded() -> (MemoryLedger, AccountId, AccountId) {
        let mut ledger = MemoryLedger::new();
        let alice = AccountId::new("alice");
        let bob = AccountId::new("bob");
        let Ok(()) = ledger.fund(&alice, &coin("okt", 100)) else {
            panic!("fund");
        };
        let Ok(()) = ledger.fund(&alice, &coin("btc", 10)) else {
            panic!("fund");
        };
        (ledger, alice, bob)
    }

    #[test]
    fn transfer_moves_all_coins() {
        let (mut ledger, alice, bob) = funded();
        let Ok(()) = ledger.transfer(&alice, &bob, &[coin("btc", 4), coin("okt", 30)]) else {
            panic!("transfer");
        };
        assert_eq!(ledger.balance_of(&alice, &coin("okt", 0).denom), Decimal::from_int(70));
        assert_eq!(ledger.balance_of(&bob, &coin("btc", 0).denom), Decimal::from_int(4));
    }

    #[test]
    fn transfer_is_atomic() {
        let (mut ledger, alice, bob) = funded();
        let before = ledger.clone().balances;
        let Err(LedgerError::InsufficientFunds { needed, available, .. }) =
            ledger.transfer(&alice, &bob, &[coin("btc", 11), coin("okt", 1)])
        else {
            panic!("expected InsufficientFunds");
        };
        assert_eq!(needed, Decimal::from_int(11));
        assert_eq!(available, Decimal::from_int(10));
        assert_eq!(ledger.balances, before);
    }

    #[test]
    fn mint_and_burn() {
        let (mut ledger, alice, _) = funded();
        let share = coin("ammswap_btc", 5);
        let Ok(()) = ledger.mint(&alice, core::slice::from_ref(&share)) else {
            panic!("mint");
        };
        assert_eq!(ledger.total_of(&share.denom), Decimal::from_int(5));
        let Ok(()) = ledger.burn(&alice, &[coin("ammswap_btc", 2)]) else {
            panic!("burn");
        };
        assert_eq!(ledger.balance_of(&alice, &share.denom), Decimal::from_int(3));
        assert!(ledger.burn(&alice, &[coin("ammswap_btc", 4)]).is_err());
    }

    #[test]
    fn fault_injection() {
        let (mut ledger, alice, _) = funded();
        ledger.set_reject_mints(true);
        ledger.set_reject_burns(true);
        let Err(LedgerError::Rejected(_)) = ledger.mint(&alice, &[coin("x", 1)]) else {
            panic!("expected Rejected");
        };
        let Err(LedgerError::Rejected(_)) = ledger.burn(&alice, &[coin("okt", 1)]) else {
            panic!("expected Rejected");
        };
    }

    #[test]
    fn blocked_denom_transfer_is_rejected() {
        let (mut ledger, alice, bob) = funded();
        ledger.set_reject_transfers_of(Some(coin("btc", 0).denom));
        let Err(LedgerError::Rejected(_)) =
            ledger.transfer(&alice, &bob, &[coin("btc", 1), coin("okt", 1)])
        else {
            panic!("expected Rejected");
        };
        assert_eq!(ledger.balance_of(&alice, &coin("okt", 0).denom), Decimal::from_int(100));
        let Ok(()) = ledger.transfer(&alice, &bob, &[coin("okt", 1)]) else {
            panic!("other denoms still move");
        };
        ledger.set_reject_transfers_of(None);
        assert!(ledger.transfer(&alice, &bob, &[coin("btc", 1)]).is_ok());
    }

    #[test]
    fn zero_balances_are_pruned() {
        let (mut ledger, alice, bob) = funded();
        let Ok(()) = ledger.transfer(&alice, &bob, &[coin("btc", 10)]) else {
            panic!("transfer");
        };
        assert!(!ledger
            .balances
            .contains_key(&(alice, coin("btc", 0).denom)));
    }
}
