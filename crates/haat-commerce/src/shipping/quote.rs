//! Shipping charge calculation.

use crate::error::CommerceError;
use crate::ids::ShippingMethodId;
use crate::money::Money;
use crate::shipping::method::ShippingMethod;
use crate::weight::Weight;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Input for a shipping quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingRequest {
    /// The method to quote.
    pub method_id: ShippingMethodId,
    /// Order amount used for the free-shipping rule.
    pub order_amount: Money,
    /// Total order weight.
    pub total_weight: Weight,
    /// Destination zone name, matched case-sensitively.
    pub zone: Option<String>,
}

impl ShippingRequest {
    /// Create a request with no zone.
    pub fn new(
        method_id: impl Into<ShippingMethodId>,
        order_amount: Money,
        total_weight: Weight,
    ) -> Self {
        Self {
            method_id: method_id.into(),
            order_amount,
            total_weight,
            zone: None,
        }
    }

    /// Set the destination zone.
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }
}

/// A shipping quote with its full charge breakdown.
///
/// When free shipping applies, `shipping_charge` is zero but the
/// breakdown components still report what the charge would have been.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingQuote {
    /// The final charge.
    pub shipping_charge: Money,
    /// Whether the free-shipping threshold was reached.
    pub is_free_shipping: bool,
    /// Order amount the quote was computed for.
    pub order_amount: Money,
    /// Total weight the quote was computed for.
    pub total_weight: Weight,
    /// Flat base charge component.
    pub base_charge: Money,
    /// Weight-dependent charge component.
    pub weight_charge: Money,
    /// Zone surcharge component (zero when no zone matched).
    pub zone_charge: Money,
    /// The method's free-shipping threshold (zero when disabled).
    pub free_shipping_threshold: Money,
}

impl ShippingMethod {
    /// Compute a quote for this method.
    ///
    /// Fails when the request is addressed to a different method, the
    /// method is inactive, the amount or weight is negative, or the
    /// request's currency does not match the method's. The method is
    /// never silently substituted or defaulted.
    pub fn quote(&self, request: &ShippingRequest) -> Result<ShippingQuote, CommerceError> {
        if request.method_id != self.id {
            return Err(CommerceError::MethodMismatch {
                method: self.id.to_string(),
                requested: request.method_id.to_string(),
            });
        }
        if !self.is_active {
            return Err(CommerceError::InactiveShippingMethod(self.id.to_string()));
        }
        if request.order_amount.is_negative() {
            return Err(CommerceError::NegativeAmount {
                field: "order_amount",
                cents: request.order_amount.amount_cents,
            });
        }
        if request.total_weight.is_negative() {
            return Err(CommerceError::NegativeWeight(
                request.total_weight.as_grams(),
            ));
        }
        if request.order_amount.currency != self.currency() {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency().code().to_string(),
                got: request.order_amount.currency.code().to_string(),
            });
        }

        // Per-kg charge over integer grams, rounded half up to the cent.
        let weight_charge = self
            .per_kg_charge
            .try_multiply_ratio(request.total_weight.as_grams(), 1000)
            .ok_or(CommerceError::Overflow)?;

        let zone_charge = request
            .zone
            .as_deref()
            .and_then(|name| self.zone(name))
            .map(|zone| zone.additional_charge)
            .unwrap_or_else(|| Money::zero(self.currency()));

        let raw_charge = self
            .base_charge
            .try_add(&weight_charge)
            .and_then(|sum| sum.try_add(&zone_charge))
            .ok_or(CommerceError::Overflow)?;

        // Free shipping is an all-or-nothing override of the computed
        // charge, not a discount on top of it.
        let is_free_shipping = self.has_free_shipping_threshold()
            && request.order_amount.amount_cents >= self.free_shipping_threshold.amount_cents;
        let shipping_charge = if is_free_shipping {
            Money::zero(self.currency())
        } else {
            raw_charge
        };

        debug!(
            "shipping quote for {}: {} (free: {}, base {}, weight {}, zone {})",
            self.id,
            shipping_charge,
            is_free_shipping,
            self.base_charge,
            weight_charge,
            zone_charge
        );

        Ok(ShippingQuote {
            shipping_charge,
            is_free_shipping,
            order_amount: request.order_amount,
            total_weight: request.total_weight,
            base_charge: self.base_charge,
            weight_charge,
            zone_charge,
            free_shipping_threshold: self.free_shipping_threshold,
        })
    }
}

/// Resolve a method by the request's id and quote it.
///
/// This is the caller-side lookup: an id that matches no method is
/// reported as not found rather than falling back to any default.
pub fn quote_shipping(
    methods: &[ShippingMethod],
    request: &ShippingRequest,
) -> Result<ShippingQuote, CommerceError> {
    let method = methods
        .iter()
        .find(|m| m.id == request.method_id)
        .ok_or_else(|| CommerceError::ShippingMethodNotFound(request.method_id.to_string()))?;
    method.quote(request)
}
