//! Structured results returned by the engine.

use serde::{Deserialize, Serialize};

use super::{Coin, Decimal, Denom, PairId};

/// Result of a successful add-liquidity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidityOutcome {
    /// Shares credited to the sender.
    pub liquidity_minted: Decimal,
    /// Base tokens taken from the sender.
    pub base_used: Coin,
}

/// Result of a successful remove-liquidity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLiquidityOutcome {
    /// Base tokens paid out.
    pub base_out: Coin,
    /// Native tokens paid out.
    pub quote_out: Coin,
}

/// Result of a successful swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    /// Tokens delivered to the recipient.
    pub bought: Coin,
    /// Native tokens passed between the two legs of a routed swap.
    pub intermediate: Option<Coin>,
}

/// What a dispatched request produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A new empty pool and its share token.
    PoolCreated {
        /// Identifier of the new pool.
        pair_id: PairId,
        /// Share token registered for it.
        share_token_id: Denom,
    },
    /// See [`AddLiquidityOutcome`].
    LiquidityAdded(AddLiquidityOutcome),
    /// See [`RemoveLiquidityOutcome`].
    LiquidityRemoved(RemoveLiquidityOutcome),
    /// See [`SwapOutcome`].
    Swapped(SwapOutcome),
}
