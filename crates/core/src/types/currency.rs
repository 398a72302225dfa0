//! Currency code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Currency`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CurrencyError {
    /// The input string is empty.
    #[error("currency cannot be empty")]
    Empty,
    /// The input string is too long for the collection schema.
    #[error("currency must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A short currency code such as `VND`, `USD`, or `EUR`.
///
/// The set is open: any non-empty code within the schema's length limit is
/// accepted, normalized to uppercase. The form offers a fixed choice of
/// codes, but documents created elsewhere may carry others.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Maximum length of a currency code (matches the collection attribute).
    pub const MAX_LENGTH: usize = 10;

    /// The codes offered by the add-location form, default first.
    pub const OFFERED: [&'static str; 3] = ["VND", "USD", "EUR"];

    /// Parse a `Currency` from a string, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or exceeds
    /// [`Currency::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, CurrencyError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CurrencyError::Empty);
        }
        if trimmed.len() > Self::MAX_LENGTH {
            return Err(CurrencyError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Returns the currency code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    /// The form's default currency.
    fn default() -> Self {
        Self("VND".to_owned())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
