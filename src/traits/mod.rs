//! Interfaces to the host environment.
//!
//! The engine owns only pool state.  Everything else it touches is an
//! explicit collaborator passed in by the caller:
//!
//! - [`Ledger`]: balances, transfers, share mint and burn
//! - [`TokenRegistry`]: which tokens exist and what kind they are
//! - [`Clock`]: current block time for deadline checks
//! - [`ParamStore`]: governance parameters (fee rate)
//! - [`EventSink`]: structured events for successful operations
//!
//! In-memory implementations live in [`crate::host`].

mod environment;
mod events;
mod ledger;
mod token_registry;

pub use environment::{Clock, ParamStore};
pub use events::{Event, EventSink};
pub use ledger::{Ledger, LedgerError};
pub use token_registry::{TokenKind, TokenMetadata, TokenRegistry};
