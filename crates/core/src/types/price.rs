//! Item price as a validated, non-negative decimal.

use core::fmt;
use std::iter::Sum;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price is not a valid decimal number")]
    NotANumber,
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative price in the store currency.
///
/// Form input arrives as a string; parsing here is the single place where
/// it becomes a number, so a bad value is a `PriceError` rather than a NaN
/// sneaking into a cart total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a `Price` from a raw decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Parse a `Price` from user input such as `"9.99"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a decimal number, or
    /// negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        let amount = trimmed
            .parse::<Decimal>()
            .map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with two decimal places, e.g. `$19.99`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|p| p.0).sum())
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        Self(iter.map(|p| p.0).sum())
    }
}

// SQLx support (with postgres feature): stored as NUMERIC
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid (CHECK constraint enforces >= 0)
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let price = Price::parse("9.99").unwrap();
        assert_eq!(price.to_string(), "9.99");
        assert_eq!(price.display(), "$9.99");
    }

    #[test]
    fn test_parse_whole_number() {
        let price = Price::parse("12").unwrap();
        assert_eq!(price.display(), "$12.00");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(Price::parse("  4.50 ").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Price::parse(""), Err(PriceError::Empty)));
        assert!(matches!(Price::parse("   "), Err(PriceError::Empty)));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            Price::parse("free"),
            Err(PriceError::NotANumber)
        ));
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(Price::parse("-1.00"), Err(PriceError::Negative)));
    }

    #[test]
    fn test_zero_is_valid() {
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
        assert_eq!(Price::parse("-0").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let prices = vec![Price::parse("9.99").unwrap(), Price::parse("9.99").unwrap()];
        let total: Price = prices.iter().sum();
        assert_eq!(total.display(), "$19.98");
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Price::parse("19.98").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
