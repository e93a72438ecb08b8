//! In-memory token registry, clock, parameters and event sink.

use std::collections::BTreeMap;

use crate::config::Params;
use crate::domain::{Denom, Timestamp};
use crate::traits::{
    Clock, Event, EventSink, ParamStore, TokenKind, TokenMetadata, TokenRegistry,
};

/// Registry backed by a map from denomination to kind.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenRegistry {
    tokens: BTreeMap<Denom, TokenKind>,
}

impl MemoryTokenRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or re-registers `denom`.
    pub fn register(&mut self, denom: Denom, kind: TokenKind) {
        self.tokens.insert(denom, kind);
    }
}

impl TokenRegistry for MemoryTokenRegistry {
    fn metadata(&self, denom: &Denom) -> Option<TokenMetadata> {
        self.tokens
            .get(denom)
            .map(|kind| TokenMetadata { kind: *kind })
    }
}

/// A clock that returns whatever time it was last set to.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock {
    now: Timestamp,
}

impl FixedClock {
    /// A clock stopped at `now`.
    #[must_use]
    pub const fn new(now: Timestamp) -> Self {
        Self { now }
    }

    /// Moves the clock to `now`.
    pub fn set(&mut self, now: Timestamp) {
        self.now = now;
    }

    /// Moves the clock forward by `secs`.
    pub fn advance(&mut self, secs: i64) {
        self.now = Timestamp::from_unix_secs(self.now.as_unix_secs().saturating_add(secs));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now
    }
}

/// Parameters held in memory and replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct StaticParams {
    params: Params,
}

impl StaticParams {
    /// Wraps `params`.  No validation: invalid sets are reported when
    /// the engine reads them.
    #[must_use]
    pub const fn new(params: Params) -> Self {
        Self { params }
    }

    /// Replaces the stored parameters.
    pub fn set(&mut self, params: Params) {
        self.params = params;
    }
}

impl ParamStore for StaticParams {
    fn params(&self) -> Params {
        self.params.clone()
    }
}

/// Keeps every emitted event in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    events: Vec<Event>,
}

impl RecordingEventSink {
    /// An empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns and clears the recorded events.
    pub fn take(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Decimal;

    #[test]
    fn registry_lookup() {
        let Ok(btc) = Denom::new("btc") else {
            panic!("valid denom");
        };
        let mut reg = MemoryTokenRegistry::new();
        assert!(!reg.exists(&btc));
        reg.register(btc.clone(), TokenKind::Fungible);
        assert!(reg.exists(&btc));
        assert_eq!(
            reg.metadata(&btc),
            Some(TokenMetadata {
                kind: TokenKind::Fungible
            })
        );
    }

    #[test]
    fn clock_moves() {
        let mut clock = FixedClock::new(Timestamp::from_unix_secs(10));
        clock.advance(5);
        assert_eq!(clock.now(), Timestamp::from_unix_secs(15));
        clock.set(Timestamp::from_unix_secs(1));
        assert_eq!(clock.now(), Timestamp::from_unix_secs(1));
    }

    #[test]
    fn params_default_fee() {
        let mut store = StaticParams::default();
        assert_eq!(store.fee_rate(), crate::config::DEFAULT_FEE_RATE);
        store.set(Params {
            fee_rate: Decimal::ZERO,
        });
        assert_eq!(store.fee_rate(), Decimal::ZERO);
    }

    #[test]
    fn sink_records_in_order() {
        let mut sink = RecordingEventSink::new();
        sink.emit(Event::new("a"));
        sink.emit(Event::new("b"));
        assert_eq!(sink.events().len(), 2);
        let taken = sink.take();
        assert_eq!(taken[0].name, "a");
        assert!(sink.events().is_empty());
    }
}
