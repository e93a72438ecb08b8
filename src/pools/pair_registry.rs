//! Durable map from pair identifier to pool state.

use std::collections::BTreeMap;

use crate::domain::{PairId, Pool};
use crate::error::SwapError;

/// All pools, keyed by [`PairId`] and enumerable in creation order.
///
/// Performs no validation beyond existence; invariants are checked by the
/// [`Pool`] transition methods before a pool is stored.
#[derive(Debug, Clone, Default)]
pub struct PairRegistry {
    pools: BTreeMap<PairId, Pool>,
    order: Vec<PairId>,
}

impl PairRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The pool stored under `id`.
    ///
    /// # Errors
    ///
    /// [`SwapError::NotFound`] if there is none.
    pub fn get(&self, id: &PairId) -> Result<&Pool, SwapError> {
        self.pools
            .get(id)
            .ok_or_else(|| SwapError::NotFound(format!("pool {id}")))
    }

    /// Stores `pool` under its own identifier, replacing any previous state.
    pub fn set(&mut self, pool: Pool) {
        let id = pool.pair_id().clone();
        if self.pools.insert(id.clone(), pool).is_none() {
            self.order.push(id);
        }
    }

    /// Stores a pool that must not exist yet.
    ///
    /// # Errors
    ///
    /// [`SwapError::AlreadyExists`] if the identifier is taken.
    pub fn insert_new(&mut self, pool: Pool) -> Result<(), SwapError> {
        if self.exists(pool.pair_id()) {
            return Err(SwapError::AlreadyExists(format!("pool {}", pool.pair_id())));
        }
        self.set(pool);
        Ok(())
    }

    /// Returns `true` if a pool is stored under `id`.
    #[must_use]
    pub fn exists(&self, id: &PairId) -> bool {
        self.pools.contains_key(id)
    }

    /// Every pool, in creation order.
    pub fn list(&self) -> impl Iterator<Item = &Pool> {
        self.order.iter().filter_map(|id| self.pools.get(id))
    }

    /// Number of pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if there are no pools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Decimal, Denom};

    fn pool(token: &str) -> Pool {
        let (Ok(base), Ok(native), Ok(share)) = (
            Denom::new(token),
            Denom::new("okt"),
            Denom::new(format!("ammswap_{token}")),
        ) else {
            panic!("valid denoms");
        };
        Pool::new(base, native, share)
    }

    #[test]
    fn get_missing_is_not_found() {
        let reg = PairRegistry::new();
        let Err(SwapError::NotFound(_)) = reg.get(pool("btc").pair_id()) else {
            panic!("expected NotFound");
        };
    }

    #[test]
    fn insert_new_rejects_duplicate() {
        let mut reg = PairRegistry::new();
        let Ok(()) = reg.insert_new(pool("btc")) else {
            panic!("first insert");
        };
        let Err(SwapError::AlreadyExists(_)) = reg.insert_new(pool("btc")) else {
            panic!("expected AlreadyExists");
        };
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn set_replaces_state_without_reordering() {
        let mut reg = PairRegistry::new();
        reg.set(pool("zrx"));
        reg.set(pool("btc"));
        let Ok(updated) = pool("zrx").with_deposit(&Decimal::ONE, &Decimal::ONE) else {
            panic!("deposit");
        };
        reg.set(updated.clone());

        let listed: Vec<&str> = reg.list().map(|p| p.pair_id().as_str()).collect();
        assert_eq!(listed, vec!["zrx_okt", "btc_okt"]);
        let Ok(stored) = reg.get(updated.pair_id()) else {
            panic!("stored");
        };
        assert_eq!(stored, &updated);
    }

    #[test]
    fn exists_and_empty() {
        let mut reg = PairRegistry::new();
        assert!(reg.is_empty());
        let p = pool("eth");
        reg.set(p.clone());
        assert!(reg.exists(p.pair_id()));
        assert!(!reg.is_empty());
    }
}
