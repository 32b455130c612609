//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored in the document store as plain numbers in the major
//! currency unit (dollars, not cents). The payment provider expects integer
//! minor units, so the conversion happens here, once, with explicit rounding.

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when building or converting a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount does not fit in an `i64` of minor units.
    #[error("price is too large")]
    Overflow,
}

/// A non-negative amount in the currency's standard unit.
///
/// Serializes as a JSON/BSON number so stored documents keep their numeric
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// The amount in minor units (cents), rounded half away from zero.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the result does not fit in an `i64`.
    ///
    /// ```
    /// use parts_core::Price;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Price::new(Decimal::new(1999, 2)).unwrap();
    /// assert_eq!(price.to_minor_units().unwrap(), 1999);
    /// ```
    pub fn to_minor_units(&self) -> Result<i64, PriceError> {
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|cents| cents.to_i64())
            .ok_or(PriceError::Overflow)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(cents: i64) -> Price {
        Price::new(Decimal::new(cents, 2)).unwrap()
    }

    #[test]
    fn test_minor_units_whole() {
        assert_eq!(price(4500).to_minor_units().unwrap(), 4500);
        assert_eq!(Price::new(Decimal::ZERO).unwrap().to_minor_units().unwrap(), 0);
    }

    #[test]
    fn test_minor_units_rounds_half_away_from_zero() {
        let p = Price::new(Decimal::new(10_005, 3)).unwrap(); // 10.005
        assert_eq!(p.to_minor_units().unwrap(), 1001);
        let p = Price::new(Decimal::new(10_004, 3)).unwrap(); // 10.004
        assert_eq!(p.to_minor_units().unwrap(), 1000);
    }

    #[test]
    fn test_minor_units_overflow() {
        assert_eq!(
            Price::new(Decimal::MAX).unwrap().to_minor_units(),
            Err(PriceError::Overflow)
        );
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(Price::new(Decimal::new(-1, 0)), Err(PriceError::Negative));
        assert!(serde_json::from_str::<Price>("-3.5").is_err());
    }

    #[test]
    fn test_json_number_shape() {
        let p: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(p, price(1250));
        assert_eq!(serde_json::to_string(&p).unwrap(), "12.5");

        let p: Price = serde_json::from_str("30").unwrap();
        assert_eq!(p.to_minor_units().unwrap(), 3000);
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(price(700).to_string(), "7.00");
    }
}
