//! Pool state storage and constant-product pricing.
//!
//! | Item | Role |
//! |------|------|
//! | [`PairRegistry`] | pool reserves keyed by pair identifier |
//! | [`PoolShareLedger`] | total supply of each share token |
//! | [`PricingEngine`] | pure swap, deposit and redemption math |

pub mod constant_product;
mod pair_registry;
mod share_ledger;

pub use constant_product::{Deposit, PricingEngine, Redemption};
pub use pair_registry::PairRegistry;
pub use share_ledger::PoolShareLedger;
