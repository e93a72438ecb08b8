//! Fundamental domain value types used throughout the engine.
//!
//! Amounts are [`Decimal`]s, token identifiers are [`Denom`]s, and pool
//! state is a [`Pool`] keyed by [`PairId`].  Newtypes with validated
//! constructors enforce the invariants; requests and outcomes are plain
//! structs with public fields.

mod account;
mod coin;
mod decimal;
mod denom;
mod outcome;
mod pool;
mod request;
mod share_token;

pub use account::{AccountId, Timestamp};
pub use coin::{Coin, canonicalize_coins};
pub use decimal::{Decimal, PRECISION, SCALE};
pub use denom::{Denom, MAX_DENOM_LEN};
pub use outcome::{AddLiquidityOutcome, Outcome, RemoveLiquidityOutcome, SwapOutcome};
pub use pool::{PairId, Pool};
pub use request::{AddLiquidity, CreatePool, RemoveLiquidity, Request, Swap};
pub use share_token::ShareToken;
