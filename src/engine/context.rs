//! Per-request view of the host collaborators.

use crate::domain::{Decimal, Timestamp};
use crate::error::SwapError;
use crate::traits::{Clock, Event, EventSink, Ledger, ParamStore, TokenRegistry};

/// The collaborators one request runs against.
///
/// Built by the host for each request and dropped afterwards; the engine
/// keeps no reference to any of them between calls.
pub struct ExecContext<'a> {
    /// Balances, transfers, share mint and burn.
    pub ledger: &'a mut dyn Ledger,
    /// Token existence and kind.
    pub tokens: &'a dyn TokenRegistry,
    /// Current block time.
    pub clock: &'a dyn Clock,
    /// Governance parameters.
    pub params: &'a dyn ParamStore,
    /// Receiver of success events.
    pub events: &'a mut dyn EventSink,
}

impl<'a> ExecContext<'a> {
    /// Bundles the collaborators.
    pub fn new(
        ledger: &'a mut dyn Ledger,
        tokens: &'a dyn TokenRegistry,
        clock: &'a dyn Clock,
        params: &'a dyn ParamStore,
        events: &'a mut dyn EventSink,
    ) -> Self {
        Self {
            ledger,
            tokens,
            clock,
            params,
            events,
        }
    }

    /// Current block time.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Fails if `deadline` is earlier than the current block time.
    ///
    /// # Errors
    ///
    /// [`SwapError::Validation`] once the deadline has passed.
    pub fn check_deadline(&self, deadline: Timestamp) -> Result<(), SwapError> {
        let now = self.now();
        if deadline.is_expired_at(now) {
            return Err(SwapError::Validation(format!(
                "block time {now} exceeded deadline {deadline}"
            )));
        }
        Ok(())
    }

    /// Current fee rate, after checking the parameter set.
    ///
    /// # Errors
    ///
    /// [`SwapError::Validation`] if governance stored a rate of 1 or more.
    pub fn fee_rate(&self) -> Result<Decimal, SwapError> {
        let params = self.params.params();
        params.validate()?;
        Ok(params.fee_rate)
    }

    /// Forwards `event` to the sink.
    pub fn emit(&mut self, event: Event) {
        self.events.emit(event);
    }
}

impl core::fmt::Debug for ExecContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExecContext")
            .field("now", &self.now())
            .finish_non_exhaustive()
    }
}
