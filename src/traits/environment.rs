//! Block clock and governance parameters.

use crate::config::Params;
use crate::domain::{Decimal, Timestamp};

/// Source of the current block time.
pub trait Clock {
    /// Current block time.
    fn now(&self) -> Timestamp;
}

/// Read-only access to governance-controlled parameters.
///
/// The engine never writes parameters; updates happen outside it.
pub trait ParamStore {
    /// Current parameter set.
    fn params(&self) -> Params;

    /// Current swap fee rate.
    fn fee_rate(&self) -> Decimal {
        self.params().fee_rate
    }
}
