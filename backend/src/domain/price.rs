//! Monetary amounts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for [`Price`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceValidationError {
    NotFinite,
    Negative,
}

impl fmt::Display for PriceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite => write!(f, "price must be a finite number"),
            Self::Negative => write!(f, "price must not be negative"),
        }
    }
}

impl std::error::Error for PriceValidationError {}

/// Non-negative decimal amount in the store currency.
///
/// ## Invariants
/// - The amount is finite and `>= 0`.
/// - [`Price::new`] keeps the amount as given. Only [`Price::times`],
///   [`Price::plus`], and [`Price::scaled`] round to cents.
///
/// # Examples
/// ```
/// use storefront::domain::Price;
///
/// let price = Price::new(89.99).unwrap();
/// assert_eq!(price.times(2).amount(), 179.98);
/// assert!(Price::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(0.0);

    /// Validate and wrap an amount.
    pub fn new(amount: f64) -> Result<Self, PriceValidationError> {
        if !amount.is_finite() {
            return Err(PriceValidationError::NotFinite);
        }
        if amount < 0.0 {
            return Err(PriceValidationError::Negative);
        }
        Ok(Self(amount))
    }

    /// Raw amount.
    #[must_use]
    pub fn amount(self) -> f64 {
        self.0
    }

    /// Amount multiplied by a line quantity, rounded to cents.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(round_cents(self.0 * f64::from(quantity)))
    }

    /// Sum of two amounts, rounded to cents.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self(round_cents(self.0 + other.0))
    }

    /// Amount scaled by a non-negative rate, rounded to cents.
    #[must_use]
    pub fn scaled(self, rate: f64) -> Self {
        Self(round_cents(self.0 * rate.max(0.0)))
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

impl TryFrom<f64> for Price {
    type Error = PriceValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN, PriceValidationError::NotFinite)]
    #[case(f64::INFINITY, PriceValidationError::NotFinite)]
    #[case(-0.01, PriceValidationError::Negative)]
    fn rejects_invalid_amounts(#[case] amount: f64, #[case] expected: PriceValidationError) {
        assert_eq!(Price::new(amount), Err(expected));
    }

    #[rstest]
    fn deserialisation_enforces_invariants() {
        assert!(serde_json::from_str::<Price>("-5").is_err());
        let price: Price = serde_json::from_str("299.99").expect("valid price");
        assert_eq!(price.amount(), 299.99);
    }

    #[rstest]
    fn arithmetic_rounds_to_cents() {
        let price = Price::new(79.99).expect("valid price");
        assert_eq!(price.times(3).amount(), 239.97);
        assert_eq!(price.plus(Price::new(0.01).expect("valid")).amount(), 80.0);
        assert_eq!(Price::new(100.0).expect("valid").scaled(0.06).amount(), 6.0);
    }

    #[rstest]
    fn construction_keeps_the_amount_as_given() {
        let price = Price::new(10.005).expect("valid price");
        assert_eq!(price.amount(), 10.005);
        assert_eq!(price.times(1).amount(), round_cents(10.005));
    }

    #[rstest]
    fn displays_two_decimals() {
        assert_eq!(Price::new(5.5).expect("valid").to_string(), "5.50");
    }
}
