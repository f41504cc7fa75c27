//! Weight type for shipping calculations.
//!
//! Stored as integer grams for the same reason [`Money`](crate::money::Money)
//! stores cents: the per-kg charge math stays exact, and NaN is
//! unrepresentable inside the core. Fractional input is only handled at
//! the [`Weight::from_kg`] boundary.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A weight in integer grams.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Weight(i64);

impl Weight {
    /// Create a weight from grams.
    pub const fn from_grams(grams: i64) -> Self {
        Self(grams)
    }

    /// Create a weight from kilograms, rounded to the nearest gram.
    ///
    /// NaN, infinite, and negative input is rejected rather than rounded.
    pub fn from_kg(kg: f64) -> Result<Self, CommerceError> {
        if !kg.is_finite() || kg < 0.0 {
            return Err(CommerceError::InvalidWeight(kg));
        }
        Ok(Self((kg * 1000.0).round() as i64))
    }

    /// Zero weight.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the weight in grams.
    pub const fn as_grams(&self) -> i64 {
        self.0
    }

    /// Get the weight in kilograms.
    pub fn as_kg(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Check if this is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if this is negative.
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Try to add another weight, returning `None` on overflow.
    pub fn try_add(&self, other: &Weight) -> Option<Weight> {
        self.0.checked_add(other.0).map(Weight)
    }

    /// Try to multiply by a scalar, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Weight> {
        self.0.checked_mul(factor).map(Weight)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} kg", self.as_kg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_from_kg() {
        let w = Weight::from_kg(1.5).unwrap();
        assert_eq!(w.as_grams(), 1500);
        assert_eq!(w.as_kg(), 1.5);
    }

    #[test]
    fn test_weight_rounds_to_gram() {
        let w = Weight::from_kg(0.2345).unwrap();
        assert_eq!(w.as_grams(), 235);
    }

    #[test]
    fn test_weight_rejects_invalid_input() {
        assert!(Weight::from_kg(f64::NAN).is_err());
        assert!(Weight::from_kg(f64::INFINITY).is_err());
        assert!(Weight::from_kg(-0.5).is_err());
    }

    #[test]
    fn test_weight_arithmetic() {
        let a = Weight::from_grams(500);
        let b = Weight::from_grams(250);
        assert_eq!(a.try_add(&b).unwrap().as_grams(), 750);
        assert_eq!(a.try_multiply(3).unwrap().as_grams(), 1500);

        let max = Weight::from_grams(i64::MAX);
        assert!(max.try_add(&a).is_none());
        assert!(max.try_multiply(2).is_none());
    }

    #[test]
    fn test_weight_display() {
        assert_eq!(Weight::from_grams(1500).to_string(), "1.500 kg");
        assert_eq!(Weight::zero().to_string(), "0.000 kg");
    }
}
