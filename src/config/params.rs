//! Governance parameters read by the engine.

use serde::{Deserialize, Serialize};

use crate::domain::Decimal;
use crate::error::SwapError;

/// Default swap fee rate: `0.003` (0.3%).
pub const DEFAULT_FEE_RATE: Decimal = Decimal::from_raw(300_000);

/// Parameters controlled by governance.
///
/// # Validation
///
/// - `fee_rate` must lie in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Fraction of every sold amount kept by the pool.
    pub fee_rate: Decimal,
}

impl Params {
    /// Creates a validated parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Validation`] if `fee_rate >= 1`.
    pub fn new(fee_rate: Decimal) -> Result<Self, SwapError> {
        let params = Self { fee_rate };
        params.validate()?;
        Ok(params)
    }

    /// Validates all parameter invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Validation`] if `fee_rate >= 1`.
    pub fn validate(&self) -> Result<(), SwapError> {
        if self.fee_rate >= Decimal::ONE {
            return Err(SwapError::Validation(format!(
                "fee rate {} must be below 1",
                self.fee_rate
            )));
        }
        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            fee_rate: DEFAULT_FEE_RATE,
        }
    }
}
