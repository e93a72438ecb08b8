//! Token metadata lookups.

use crate::domain::Denom;

/// Category of a registered token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Ordinary fungible token; can be pooled.
    Fungible,
    /// Non-fungible token; cannot be pooled.
    NonFungible,
    /// Liquidity-share token of some pool; cannot be pooled.
    PoolShare,
}

/// Metadata the engine needs about a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Category of the token.
    pub kind: TokenKind,
}

/// Read-only view of the host's token registry.
pub trait TokenRegistry {
    /// Returns `true` if `denom` is registered.
    fn exists(&self, denom: &Denom) -> bool {
        self.metadata(denom).is_some()
    }

    /// Metadata for `denom`, or `None` if it is not registered.
    fn metadata(&self, denom: &Denom) -> Option<TokenMetadata>;
}
