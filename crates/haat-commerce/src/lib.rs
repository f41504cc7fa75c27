//! E-commerce domain types and logic for Haat.
//!
//! This crate provides the storefront core for building e-commerce
//! applications:
//!
//! - **Catalog**: Products, categories, brands, stock and discount status
//! - **Search**: Filtered catalog queries with stable sorting, clamped
//!   pagination, and facet counts
//! - **Cart**: Shopping cart with merged lines and checked totals
//! - **Shipping**: Weight- and zone-based shipping quotes with
//!   free-shipping thresholds
//!
//! # Example
//!
//! ```rust
//! use haat_commerce::prelude::*;
//!
//! // A product in the catalog
//! let mut phone = Product::new(
//!     "Aurora X5",
//!     Money::new(2_499_900, Currency::BDT),
//!     CategoryId::new("cat-electronics"),
//!     BrandId::new("brand-aurora"),
//! );
//! phone.discount_percent = 10;
//! phone.stock = 25;
//! phone.weight = Weight::from_grams(450);
//!
//! // Query the catalog
//! let engine = CatalogEngine::new();
//! let criteria = QueryCriteria::new()
//!     .with_search("aurora")
//!     .with_sort(SortKey::PriceAsc);
//! let results = engine.query(&[phone.clone()], &criteria)?;
//! assert_eq!(results.len(), 1);
//!
//! // Add to a cart and quote shipping
//! let mut cart = Cart::new(Currency::BDT);
//! cart.add_product(&phone, 2)?;
//!
//! let method = ShippingMethod::new("Standard", Money::new(6_000, Currency::BDT))
//!     .with_per_kg_charge(Money::new(2_000, Currency::BDT));
//! let request = cart.shipping_request(method.id.clone(), None)?;
//! let quote = method.quote(&request)?;
//! assert!(quote.shipping_charge.is_positive());
//! # Ok::<(), haat_commerce::CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod weight;

pub mod cart;
pub mod catalog;
pub mod search;
pub mod shipping;

pub use error::{CommerceError, ErrorKind};
pub use ids::*;
pub use money::{Currency, Money};
pub use weight::Weight;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, ErrorKind};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::weight::Weight;

    // Catalog
    pub use crate::catalog::{
        Brand, Category, DiscountStatus, Product, StockStatus, DEFAULT_LOW_STOCK_THRESHOLD,
    };

    // Cart
    pub use crate::cart::{Cart, CartItem, MAX_QUANTITY_PER_ITEM};

    // Search
    pub use crate::search::{
        CatalogEngine, Facet, FacetValue, Pagination, PriceRange, QueryCriteria, QueryResults,
        SortKey, DEFAULT_PER_PAGE,
    };

    // Shipping
    pub use crate::shipping::{
        quote_shipping, EstimatedDays, ShippingMethod, ShippingQuote, ShippingRequest,
        ShippingZone,
    };
}
