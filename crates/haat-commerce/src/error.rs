//! Commerce error types.

use thiserror::Error;

/// Coarse classification of a [`CommerceError`].
///
/// Callers that only care how to present a failure can branch on the kind
/// instead of matching individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: negative amounts, zero page size, non-finite numbers,
    /// unrecognized tokens.
    InvalidArgument,
    /// Operation on a record whose state forbids it (e.g. an inactive
    /// shipping method).
    InvalidState,
    /// A referenced record could not be resolved.
    NotFound,
}

/// Errors that can occur in storefront computations.
///
/// Every variant is a non-retryable validation failure: the calling UI is
/// expected to surface it and fix its input, never retry or substitute a
/// default.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Page size of zero was requested.
    #[error("page size must be positive, got {0}")]
    InvalidPageSize(u32),

    /// A monetary amount that must be non-negative was negative.
    #[error("{field} must not be negative, got {cents} cents")]
    NegativeAmount { field: &'static str, cents: i64 },

    /// A decimal amount was NaN or infinite.
    #[error("amount must be finite, got {0}")]
    NonFiniteAmount(f64),

    /// A weight in grams was negative.
    #[error("weight must not be negative, got {0} g")]
    NegativeWeight(i64),

    /// A weight in kilograms was NaN, infinite, or negative.
    #[error("weight must be a finite non-negative number, got {0} kg")]
    InvalidWeight(f64),

    /// Discount percent outside 0..=100.
    #[error("discount percent must be at most 100, got {0}")]
    InvalidDiscountPercent(u8),

    /// Product rating outside 0..=5.
    #[error("rating must be between 0 and 5, got {0}")]
    InvalidRating(f64),

    /// Delivery day range with min greater than max.
    #[error("invalid delivery window: {min}-{max} days")]
    InvalidDeliveryWindow { min: u32, max: u32 },

    /// A filter or sort token that no closed enum recognises.
    #[error("unrecognized {dimension} token: {token}")]
    UnrecognizedToken {
        dimension: &'static str,
        token: String,
    },

    /// Quantity must be positive.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Quantity exceeds the per-item maximum.
    #[error("quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(u32, u32),

    /// A quote request addressed to a different shipping method.
    #[error("shipping request addressed to method {requested}, not {method}")]
    MethodMismatch { method: String, requested: String },

    /// Currency mismatch between two amounts.
    #[error("currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow in a monetary or weight calculation.
    #[error("arithmetic overflow in charge calculation")]
    Overflow,

    /// Shipping method is disabled.
    #[error("shipping method is inactive: {0}")]
    InactiveShippingMethod(String),

    /// Shipping method id could not be resolved.
    #[error("shipping method not found: {0}")]
    ShippingMethodNotFound(String),

    /// Malformed payload from the data-fetching layer.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CommerceError {
    /// Classify this error into the coarse taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommerceError::InvalidPageSize(_)
            | CommerceError::NegativeAmount { .. }
            | CommerceError::NonFiniteAmount(_)
            | CommerceError::NegativeWeight(_)
            | CommerceError::InvalidWeight(_)
            | CommerceError::InvalidDiscountPercent(_)
            | CommerceError::InvalidRating(_)
            | CommerceError::InvalidDeliveryWindow { .. }
            | CommerceError::UnrecognizedToken { .. }
            | CommerceError::InvalidQuantity(_)
            | CommerceError::QuantityExceedsLimit(_, _)
            | CommerceError::MethodMismatch { .. }
            | CommerceError::CurrencyMismatch { .. }
            | CommerceError::Overflow
            | CommerceError::Serialization(_) => ErrorKind::InvalidArgument,
            CommerceError::InactiveShippingMethod(_) => ErrorKind::InvalidState,
            CommerceError::ShippingMethodNotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Whether the error reports malformed caller input.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
