//! Validated token denomination.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SwapError;

/// Maximum length of a denomination, in bytes.
pub const MAX_DENOM_LEN: usize = 64;

/// A token identifier such as `"okt"`, `"btc-a19"` or `"ammswap_btc"`.
///
/// Must be 1 to 64 characters long, start with an ASCII lowercase letter,
/// and contain only lowercase letters, digits, `-`, `_` and `.`.
///
/// Ordering is lexicographic on the string, which is the order used when
/// canonicalizing coin lists.
///
/// # Examples
///
/// ```
/// use ammswap::domain::Denom;
///
/// let d = Denom::new("btc").expect("valid");
/// assert_eq!(d.as_str(), "btc");
/// assert!(Denom::new("BTC").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Denom(String);

impl Denom {
    /// Creates a validated denomination.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Validation`] if the text breaks the naming rules.
    pub fn new(value: impl Into<String>) -> Result<Self, SwapError> {
        let value = value.into();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// Wraps a literal known to satisfy the naming rules.
    ///
    /// Only for compile-time constants; every other path goes through
    /// [`Denom::new`].
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_owned())
    }

    fn validate(value: &str) -> Result<(), SwapError> {
        if value.is_empty() || value.len() > MAX_DENOM_LEN {
            return Err(SwapError::Validation(format!(
                "denom '{value}' must be 1 to {MAX_DENOM_LEN} characters"
            )));
        }
        let mut bytes = value.bytes();
        if !bytes.next().is_some_and(|b| b.is_ascii_lowercase()) {
            return Err(SwapError::Validation(format!(
                "denom '{value}' must start with a lowercase letter"
            )));
        }
        let allowed =
            |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'-' | b'_' | b'.');
        if !bytes.all(allowed) {
            return Err(SwapError::Validation(format!(
                "denom '{value}' contains invalid characters"
            )));
        }
        Ok(())
    }

    /// Returns the denomination text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Denom {
    type Error = SwapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Denom> for String {
    fn from(denom: Denom) -> Self {
        denom.0
    }
}
