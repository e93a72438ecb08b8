//! In-memory host collaborators.
//!
//! These implement the [`traits`](crate::traits) with plain maps and
//! vectors.  They back the tests and the demo, and serve as a reference
//! for embedding the engine in a real ledger.

mod environment;
mod ledger;

pub use environment::{FixedClock, MemoryTokenRegistry, RecordingEventSink, StaticParams};
pub use ledger::MemoryLedger;

use crate::engine::ExecContext;

/// Every in-memory collaborator in one place.
///
/// # Example
///
/// ```rust
/// use ammswap::domain::Timestamp;
/// use ammswap::host::MemoryHost;
///
/// let mut host = MemoryHost::new();
/// host.clock.set(Timestamp::from_unix_secs(42));
/// assert_eq!(host.context().now(), Timestamp::from_unix_secs(42));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    /// Balances.
    pub ledger: MemoryLedger,
    /// Registered tokens.
    pub tokens: MemoryTokenRegistry,
    /// Block time.
    pub clock: FixedClock,
    /// Governance parameters.
    pub params: StaticParams,
    /// Emitted events.
    pub events: RecordingEventSink,
}

impl MemoryHost {
    /// A host with empty state, time zero and default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows every collaborator for one request.
    pub fn context(&mut self) -> ExecContext<'_> {
        ExecContext::new(
            &mut self.ledger,
            &self.tokens,
            &self.clock,
            &self.params,
            &mut self.events,
        )
    }
}
