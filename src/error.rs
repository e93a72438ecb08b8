//! Unified error types for the swap engine.
//!
//! Every fallible operation in the crate returns [`SwapError`].  Each
//! variant maps onto one [`ErrorKind`] so the outer transaction layer can
//! translate a failure into its own result codes without matching on
//! message text.

use crate::traits::LedgerError;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, SwapError>;

/// Failure classes reported to the caller of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Deadline passed, malformed request, or a computed amount of zero.
    Validation,
    /// Pool, pair or share token missing.
    NotFound,
    /// Duplicate pool or share token.
    AlreadyExists,
    /// A caller-supplied min/max threshold was violated.
    Slippage,
    /// The ledger could not move the requested coins.
    InsufficientFunds,
    /// Pool state is inconsistent; signals corruption, not user error.
    Invariant,
    /// Checked arithmetic failed or a collaborator rejected the call.
    Internal,
}

/// Errors produced by the swap engine.
///
/// No variant is fatal: every error is returned to the caller as a failed
/// result and the process keeps running.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwapError {
    /// The request is malformed, expired, or yields a zero amount.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The referenced pool, pair or token does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The pool or share token being created already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// A min/max bound supplied by the caller was not met.
    #[error("slippage bound violated: {0}")]
    Slippage(String),

    /// The sender (or the module account) lacks the coins to settle.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Reserves and share supply disagree.
    #[error("pool invariant violated: {0}")]
    Invariant(String),

    /// Checked arithmetic overflowed or underflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A division by zero was attempted.
    #[error("division by zero")]
    DivisionByZero,

    /// The ledger rejected a mint, burn or transfer for a reason other
    /// than missing funds.
    #[error("ledger rejected operation: {0}")]
    Ledger(String),
}

impl SwapError {
    /// Returns the failure class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::Slippage(_) => ErrorKind::Slippage,
            Self::InsufficientFunds(_) => ErrorKind::InsufficientFunds,
            Self::Invariant(_) => ErrorKind::Invariant,
            Self::Overflow(_) | Self::DivisionByZero | Self::Ledger(_) => ErrorKind::Internal,
        }
    }

    /// Shorthand for a [`SwapError::Validation`] with the given message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<LedgerError> for SwapError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds { .. } => Self::InsufficientFunds(err.to_string()),
            LedgerError::Rejected(_) => Self::Ledger(err.to_string()),
        }
    }
}
