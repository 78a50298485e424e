//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Error parsing a [`Price`] from its stored text form.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid price: {0}")]
pub struct PriceError(#[from] rust_decimal::Error);

/// A product price in the store currency.
///
/// Wraps a [`Decimal`] so amounts never round-trip through floats. The
/// storefront is single-currency; the amount is in the currency's standard
/// unit (e.g. dollars, not cents). Persisted as text and re-parsed by the
/// repository layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_major_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Parse a price from its stored text form.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] if the text is not a valid decimal number.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        Ok(Self(Decimal::from_str(s)?))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
