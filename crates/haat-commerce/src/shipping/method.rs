//! Shipping method records.

use crate::error::CommerceError;
use crate::ids::ShippingMethodId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Estimated delivery window in days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EstimatedDays {
    /// Minimum delivery days.
    pub min: u32,
    /// Maximum delivery days.
    pub max: u32,
}

impl EstimatedDays {
    /// Create a delivery window; `min` must not exceed `max`.
    pub fn new(min: u32, max: u32) -> Result<Self, CommerceError> {
        if min > max {
            return Err(CommerceError::InvalidDeliveryWindow { min, max });
        }
        Ok(Self { min, max })
    }

    /// Get a delivery estimate string (e.g. "3-5 days").
    pub fn estimate(&self) -> String {
        if self.min == self.max {
            format!("{} days", self.min)
        } else {
            format!("{}-{} days", self.min, self.max)
        }
    }
}

/// A named shipping region carrying an additional flat surcharge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingZone {
    /// Zone name, matched case-sensitively at quote time.
    pub name: String,
    /// Countries the zone covers.
    pub countries: Vec<String>,
    /// Flat surcharge added on top of base and weight charges.
    pub additional_charge: Money,
}

impl ShippingZone {
    /// Create a new zone.
    pub fn new(name: impl Into<String>, additional_charge: Money) -> Self {
        Self {
            name: name.into(),
            countries: Vec::new(),
            additional_charge,
        }
    }

    /// Add a covered country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.countries.push(country.into());
        self
    }
}

/// A shipping method with its charge model.
///
/// The final charge is `base_charge + per_kg_charge * weight +
/// zone surcharge`, overridden to zero when the order amount reaches
/// `free_shipping_threshold` (a threshold of zero disables free
/// shipping).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingMethod {
    /// Unique identifier.
    pub id: ShippingMethodId,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Whether the method can currently be quoted.
    pub is_active: bool,
    /// Flat charge applied to every shipment.
    pub base_charge: Money,
    /// Charge per kilogram of order weight.
    pub per_kg_charge: Money,
    /// Informational minimum order amount for this method.
    pub min_order_amount: Money,
    /// Order amount at which shipping becomes free; zero disables.
    pub free_shipping_threshold: Money,
    /// Estimated delivery window.
    pub estimated_days: EstimatedDays,
    /// Zones in priority order; the first name match wins.
    pub zones: Vec<ShippingZone>,
}

impl ShippingMethod {
    /// Create an active method with no weight charge, thresholds, or
    /// zones.
    pub fn new(name: impl Into<String>, base_charge: Money) -> Self {
        let currency = base_charge.currency;
        Self {
            id: ShippingMethodId::generate(),
            name: name.into(),
            description: None,
            is_active: true,
            base_charge,
            per_kg_charge: Money::zero(currency),
            min_order_amount: Money::zero(currency),
            free_shipping_threshold: Money::zero(currency),
            estimated_days: EstimatedDays { min: 1, max: 1 },
            zones: Vec::new(),
        }
    }

    /// Set the per-kilogram charge.
    pub fn with_per_kg_charge(mut self, charge: Money) -> Self {
        self.per_kg_charge = charge;
        self
    }

    /// Set the free-shipping threshold.
    pub fn with_free_shipping_threshold(mut self, threshold: Money) -> Self {
        self.free_shipping_threshold = threshold;
        self
    }

    /// Set the estimated delivery window.
    pub fn with_estimated_days(mut self, days: EstimatedDays) -> Self {
        self.estimated_days = days;
        self
    }

    /// Append a zone.
    pub fn with_zone(mut self, zone: ShippingZone) -> Self {
        self.zones.push(zone);
        self
    }

    /// Look up a zone by exact, case-sensitive name.
    pub fn zone(&self, name: &str) -> Option<&ShippingZone> {
        self.zones.iter().find(|z| z.name == name)
    }

    /// Whether a free-shipping threshold is configured.
    pub fn has_free_shipping_threshold(&self) -> bool {
        self.free_shipping_threshold.is_positive()
    }

    /// The currency all of this method's charges are denominated in.
    pub fn currency(&self) -> Currency {
        self.base_charge.currency
    }

    /// Get a delivery estimate string (e.g. "3-5 days").
    pub fn delivery_estimate(&self) -> String {
        self.estimated_days.estimate()
    }
}
