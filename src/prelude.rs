//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use ammswap::prelude::*;
//! ```
//!
//! Brings the domain types, the engine, the collaborator traits, and the
//! error type into scope in one import.

// Domain types
pub use crate::domain::{
    AccountId, AddLiquidity, Coin, CreatePool, Decimal, Denom, Outcome, PairId, Pool,
    RemoveLiquidity, Request, Swap, Timestamp,
};

// Engine
pub use crate::engine::{ExecContext, SwapEngine};

// Collaborator traits
pub use crate::traits::{Clock, EventSink, Ledger, ParamStore, TokenKind, TokenRegistry};

// Math utilities
pub use crate::math::CheckedArithmetic;

// Configuration
pub use crate::config::{EngineConfig, Params};

// Error types
pub use crate::error::{ErrorKind, Result, SwapError};
