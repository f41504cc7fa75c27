//! Product records and stock/discount classification.

use crate::error::CommerceError;
use crate::ids::{BrandId, CategoryId, ProductId};
use crate::money::{Currency, Money};
use crate::weight::Weight;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default unit count at or below which a product counts as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Stock availability classification.
///
/// A closed set: unrecognized wire tokens are rejected at parse time
/// instead of silently matching nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    /// More units than the low-stock threshold.
    InStock,
    /// At least one unit, at most the low-stock threshold.
    LowStock,
    /// Zero units.
    OutOfStock,
}

impl StockStatus {
    /// Classify a stock count against a low-stock threshold.
    pub fn classify(stock: u32, low_stock_threshold: u32) -> Self {
        if stock == 0 {
            StockStatus::OutOfStock
        } else if stock <= low_stock_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl FromStr for StockStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in-stock" => Ok(StockStatus::InStock),
            "low-stock" => Ok(StockStatus::LowStock),
            "out-of-stock" => Ok(StockStatus::OutOfStock),
            _ => Err(CommerceError::UnrecognizedToken {
                dimension: "stock status",
                token: s.to_string(),
            }),
        }
    }
}

/// Discount presence classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscountStatus {
    /// Discount percent above zero.
    WithDiscount,
    /// No discount.
    WithoutDiscount,
}

impl DiscountStatus {
    /// Classify a discount percent.
    pub fn classify(discount_percent: u8) -> Self {
        if discount_percent > 0 {
            DiscountStatus::WithDiscount
        } else {
            DiscountStatus::WithoutDiscount
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountStatus::WithDiscount => "with-discount",
            DiscountStatus::WithoutDiscount => "without-discount",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DiscountStatus::WithDiscount => "On Sale",
            DiscountStatus::WithoutDiscount => "Regular Price",
        }
    }
}

impl FromStr for DiscountStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "with-discount" => Ok(DiscountStatus::WithDiscount),
            "without-discount" => Ok(DiscountStatus::WithoutDiscount),
            _ => Err(CommerceError::UnrecognizedToken {
                dimension: "discount status",
                token: s.to_string(),
            }),
        }
    }
}

/// A product in the catalog.
///
/// Products are read-only inputs supplied by the data-fetching layer;
/// the query engine and cart never mutate them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Short description for listings, searched alongside the title.
    pub short_description: String,
    /// Base unit price (non-negative).
    pub price: Money,
    /// Percent off the base price, 0..=100.
    pub discount_percent: u8,
    /// Units available.
    pub stock: u32,
    /// Category this product belongs to.
    pub category: CategoryId,
    /// Brand this product belongs to.
    pub brand: BrandId,
    /// Optional subcategory label.
    pub subcategory: Option<String>,
    /// Free-text tag (e.g. "featured", "new") used as an exact-match filter.
    pub remark: Option<String>,
    /// Average customer rating, 0..=5.
    pub rating: Option<f64>,
    /// Unit weight for shipping.
    pub weight: Weight,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Product {
    /// Create a new product with defaults for the optional fields.
    pub fn new(
        title: impl Into<String>,
        price: Money,
        category: CategoryId,
        brand: BrandId,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: ProductId::generate(),
            title: title.into(),
            short_description: String::new(),
            price,
            discount_percent: 0,
            stock: 0,
            category,
            brand,
            subcategory: None,
            remark: None,
            rating: None,
            weight: Weight::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate an API-sourced record against the catalog invariants.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.price.is_negative() {
            return Err(CommerceError::NegativeAmount {
                field: "price",
                cents: self.price.amount_cents,
            });
        }
        if self.discount_percent > 100 {
            return Err(CommerceError::InvalidDiscountPercent(self.discount_percent));
        }
        if let Some(rating) = self.rating {
            if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
                return Err(CommerceError::InvalidRating(rating));
            }
        }
        if self.weight.is_negative() {
            return Err(CommerceError::NegativeWeight(self.weight.as_grams()));
        }
        Ok(())
    }

    /// Price after discount, rounded half up to the cent.
    pub fn sale_price(&self) -> Money {
        self.price
            .percentage(100u8.saturating_sub(self.discount_percent))
    }

    /// Check if a discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount_percent > 0
    }

    /// Classify this product's stock against a low-stock threshold.
    pub fn stock_status(&self, low_stock_threshold: u32) -> StockStatus {
        StockStatus::classify(self.stock, low_stock_threshold)
    }

    /// Classify this product's discount.
    pub fn discount_status(&self) -> DiscountStatus {
        DiscountStatus::classify(self.discount_percent)
    }

    /// Rating with missing values treated as zero.
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// The currency this product is priced in.
    pub fn currency(&self) -> Currency {
        self.price.currency
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
