//! Liquidity-share token supply record.

use serde::{Deserialize, Serialize};

use super::{Decimal, Denom};

/// A pool's share token and its total outstanding supply.
///
/// Supply changes only through liquidity mint and burn.  Per-holder
/// balances live in the external ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareToken {
    /// Share token denomination, e.g. `"ammswap_btc"`.
    pub id: Denom,
    /// Total shares outstanding.
    pub total_supply: Decimal,
}

impl ShareToken {
    /// A new share token with zero supply.
    #[must_use]
    pub const fn new(id: Denom) -> Self {
        Self {
            id,
            total_supply: Decimal::ZERO,
        }
    }
}
