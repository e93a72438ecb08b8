//! Request execution: liquidity, swaps, and the dispatcher.
//!
//! [`SwapEngine`] is the entry point.  It owns the
//! [`PairRegistry`](crate::pools::PairRegistry) and
//! [`PoolShareLedger`](crate::pools::PoolShareLedger) and, for each
//! request, lends them to a [`LiquidityManager`] or [`SwapRouter`]
//! together with the host collaborators in an [`ExecContext`].

mod context;
mod dispatcher;
mod liquidity;
mod router;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use context::ExecContext;
pub use dispatcher::SwapEngine;
pub use liquidity::LiquidityManager;
pub use router::{Route, SwapLeg, SwapRouter, plan_route};
