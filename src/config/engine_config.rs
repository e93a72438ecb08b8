//! Static deployment configuration of the engine.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Denom, PairId};
use crate::error::SwapError;

/// Deployment-time settings that never change while the engine runs.
///
/// Every pool is quoted against `native_denom`; every pool's coins are
/// held by `module_account`; share tokens are named
/// `"<share_token_prefix><token>"`.
///
/// # Validation
///
/// - `module_account` must not be empty.
/// - `share_token_prefix` must produce valid denominations and must not
///   be a prefix of `native_denom`.
///
/// # Examples
///
/// ```
/// use ammswap::config::EngineConfig;
///
/// let cfg = EngineConfig::from_toml_str(r#"native_denom = "tokt""#).expect("valid");
/// assert_eq!(cfg.native_denom().as_str(), "tokt");
/// assert_eq!(cfg.module_account().as_str(), "ammswap");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    native_denom: Denom,
    module_account: AccountId,
    share_token_prefix: String,
}

impl EngineConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Validation`] if any invariant is broken.
    pub fn new(
        native_denom: Denom,
        module_account: AccountId,
        share_token_prefix: impl Into<String>,
    ) -> Result<Self, SwapError> {
        let config = Self {
            native_denom,
            module_account,
            share_token_prefix: share_token_prefix.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Validation`] on malformed TOML or an invalid
    /// configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, SwapError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| SwapError::Validation(format!("engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Validation`] if any invariant is broken.
    pub fn validate(&self) -> Result<(), SwapError> {
        if self.module_account.is_empty() {
            return Err(SwapError::validation("module account must not be empty"));
        }
        if self.share_token_prefix.is_empty() {
            return Err(SwapError::validation("share token prefix must not be empty"));
        }
        Denom::new(format!("{}x", self.share_token_prefix))?;
        if self.is_share_token(&self.native_denom) {
            return Err(SwapError::Validation(format!(
                "native denom {} collides with share token prefix {}",
                self.native_denom, self.share_token_prefix
            )));
        }
        Ok(())
    }

    /// The reserve token every pool is quoted against.
    #[must_use]
    pub const fn native_denom(&self) -> &Denom {
        &self.native_denom
    }

    /// The account holding every pool's coins.
    #[must_use]
    pub const fn module_account(&self) -> &AccountId {
        &self.module_account
    }

    /// Prefix of every share token denomination.
    #[must_use]
    pub fn share_token_prefix(&self) -> &str {
        &self.share_token_prefix
    }

    /// Identifier of the pool pairing `token` with the native token.
    #[must_use]
    pub fn pair_id(&self, token: &Denom) -> PairId {
        PairId::new(token, &self.native_denom)
    }

    /// Share token denomination for the pool of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Validation`] if the result exceeds the
    /// denomination length limit.
    pub fn share_token_id(&self, token: &Denom) -> Result<Denom, SwapError> {
        Denom::new(format!("{}{token}", self.share_token_prefix))
    }

    /// Returns `true` if `denom` is named like a share token.
    #[must_use]
    pub fn is_share_token(&self, denom: &Denom) -> bool {
        denom.as_str().starts_with(&self.share_token_prefix)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            native_denom: Denom::from_static("okt"),
            module_account: AccountId::new("ammswap"),
            share_token_prefix: String::from("ammswap_"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn denom(s: &str) -> Denom {
        let Ok(d) = Denom::new(s) else {
            panic!("valid denom");
        };
        d
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.native_denom().as_str(), "okt");
        assert_eq!(cfg.module_account().as_str(), "ammswap");
        assert_eq!(cfg.share_token_prefix(), "ammswap_");
    }

    #[test]
    fn naming() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.pair_id(&denom("btc")).as_str(), "btc_okt");
        let Ok(share) = cfg.share_token_id(&denom("btc")) else {
            panic!("valid share id");
        };
        assert_eq!(share.as_str(), "ammswap_btc");
        assert!(cfg.is_share_token(&share));
        assert!(!cfg.is_share_token(&denom("btc")));
    }

    #[test]
    fn share_id_too_long() {
        let cfg = EngineConfig::default();
        let long = denom(&"a".repeat(60));
        assert!(cfg.share_token_id(&long).is_err());
    }

    #[test]
    fn rejects_empty_module_account() {
        let Err(SwapError::Validation(_)) =
            EngineConfig::new(denom("okt"), AccountId::new(""), "ammswap_")
        else {
            panic!("expected Validation");
        };
    }

    #[test]
    fn rejects_bad_prefix() {
        assert!(EngineConfig::new(denom("okt"), AccountId::new("m"), "").is_err());
        assert!(EngineConfig::new(denom("okt"), AccountId::new("m"), "Pool_").is_err());
    }

    #[test]
    fn rejects_native_with_share_prefix() {
        assert!(EngineConfig::new(denom("lp_okt"), AccountId::new("m"), "lp_").is_err());
    }

    #[test]
    fn toml_overrides() {
        let text = r#"
            native_denom = "tokt"
            module_account = "pool-vault"
            share_token_prefix = "lp_"
        "#;
        let Ok(cfg) = EngineConfig::from_toml_str(text) else {
            panic!("valid toml");
        };
        assert_eq!(cfg.native_denom().as_str(), "tokt");
        assert_eq!(cfg.module_account().as_str(), "pool-vault");
        assert_eq!(cfg.share_token_prefix(), "lp_");
    }

    #[test]
    fn toml_rejects_unknown_key() {
        let Err(SwapError::Validation(_)) = EngineConfig::from_toml_str("fee = 3") else {
            panic!("expected Validation");
        };
    }

    #[test]
    fn toml_rejects_invalid_native() {
        assert!(EngineConfig::from_toml_str(r#"native_denom = "OKT""#).is_err());
    }
}
