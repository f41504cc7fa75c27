//! Query criteria builder.

use crate::catalog::{DiscountStatus, StockStatus};
use crate::error::CommerceError;
use crate::ids::{BrandId, CategoryId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default page size for catalog listings.
pub const DEFAULT_PER_PAGE: u32 = 24;

/// Sort order for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Sort by title A-Z.
    #[default]
    Name,
    /// Sort by price, low to high.
    #[serde(rename = "price-low")]
    PriceAsc,
    /// Sort by price, high to low.
    #[serde(rename = "price-high")]
    PriceDesc,
    /// Sort by highest rated.
    Rating,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceAsc => "price-low",
            SortKey::PriceDesc => "price-high",
            SortKey::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Name => "Name: A-Z",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::Rating => "Highest Rated",
        }
    }
}

impl FromStr for SortKey {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "price-low" => Ok(SortKey::PriceAsc),
            "price-high" => Ok(SortKey::PriceDesc),
            "rating" => Ok(SortKey::Rating),
            _ => Err(CommerceError::UnrecognizedToken {
                dimension: "sort key",
                token: s.to_string(),
            }),
        }
    }
}

/// An inclusive price range with optional bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PriceRange {
    /// Inclusive lower bound.
    pub min: Option<Money>,
    /// Inclusive upper bound.
    pub max: Option<Money>,
}

impl PriceRange {
    /// Create a price range from optional bounds.
    pub fn new(min: Option<Money>, max: Option<Money>) -> Self {
        Self { min, max }
    }

    /// Parse a range from raw form input.
    ///
    /// Lenient: an empty or non-numeric bound is treated as unset for that
    /// bound, matching how a filter form clears a field.
    pub fn parse(min_raw: &str, max_raw: &str, currency: Currency) -> Self {
        Self {
            min: parse_bound(min_raw, currency),
            max: parse_bound(max_raw, currency),
        }
    }

    /// Check whether a price falls inside the range.
    pub fn contains(&self, price: Money) -> bool {
        let above_min = self
            .min
            .map(|min| price.amount_cents >= min.amount_cents)
            .unwrap_or(true);
        let below_max = self
            .max
            .map(|max| price.amount_cents <= max.amount_cents)
            .unwrap_or(true);
        above_min && below_max
    }

    /// Check whether both bounds are unset.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

fn parse_bound(raw: &str, currency: Currency) -> Option<Money> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(|amount| Money::from_decimal(amount, currency).ok())
}

/// Filter, sort, and pagination criteria for a catalog query.
///
/// Owned by the caller; the engine reads it and never mutates it. Absent
/// filters match everything, and all present filters are combined with
/// logical AND.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryCriteria {
    /// Case-insensitive search term matched against title and description.
    /// Empty or whitespace-only means no search filter.
    pub search: String,
    /// Exact-match category filter.
    pub category: Option<CategoryId>,
    /// Exact-match brand filter.
    pub brand: Option<BrandId>,
    /// Exact-match subcategory filter.
    pub subcategory: Option<String>,
    /// Exact-match remark tag filter.
    pub remark: Option<String>,
    /// Inclusive price range filter.
    pub price_range: PriceRange,
    /// Stock status filter.
    pub stock: Option<StockStatus>,
    /// Discount status filter.
    pub discount: Option<DiscountStatus>,
    /// Sort order.
    pub sort: SortKey,
    /// Requested page (1-indexed; clamped to the available pages).
    pub page: u32,
    /// Items per page (must be positive).
    pub per_page: u32,
}

impl QueryCriteria {
    /// Create criteria that match everything, sorted by name.
    pub fn new() -> Self {
        Self {
            search: String::new(),
            category: None,
            brand: None,
            subcategory: None,
            remark: None,
            price_range: PriceRange::default(),
            stock: None,
            discount: None,
            sort: SortKey::Name,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Filter by category.
    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by brand.
    pub fn with_brand(mut self, brand: impl Into<BrandId>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Filter by subcategory.
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Filter by remark tag.
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Filter by price range.
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    /// Filter by stock status.
    pub fn with_stock(mut self, status: StockStatus) -> Self {
        self.stock = Some(status);
        self
    }

    /// Filter by discount status.
    pub fn with_discount(mut self, status: DiscountStatus) -> Self {
        self.discount = Some(status);
        self
    }

    /// Set the sort order.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, page: u32, per_page: u32) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    /// Validate the criteria.
    ///
    /// A zero page size is a caller bug and is reported rather than
    /// silently defaulted.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.per_page == 0 {
            return Err(CommerceError::InvalidPageSize(self.per_page));
        }
        Ok(())
    }

    /// The trimmed search term, or `None` when no search is requested.
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        if term.is_empty() {
            None
        } else {
            Some(term)
        }
    }

    /// Check whether any filter dimension is active.
    pub fn has_filters(&self) -> bool {
        self.search_term().is_some()
            || self.category.is_some()
            || self.brand.is_some()
            || self.subcategory.is_some()
            || self.remark.is_some()
            || !self.price_range.is_unbounded()
            || self.stock.is_some()
            || self.discount.is_some()
    }
}

impl Default for QueryCriteria {
    fn default() -> Self {
        Self::new()
    }
}
