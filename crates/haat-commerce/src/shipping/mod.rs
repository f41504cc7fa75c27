//! Shipping module.
//!
//! Contains shipping method records, zones, and the charge calculator.

mod method;
mod quote;

pub use method::{EstimatedDays, ShippingMethod, ShippingZone};
pub use quote::{quote_shipping, ShippingQuote, ShippingRequest};
