//! Product catalog module.
//!
//! Contains the product record, stock/discount classification, and the
//! category/brand taxonomy.

mod product;
mod taxonomy;

pub use product::{
    DiscountStatus, Product, StockStatus, DEFAULT_LOW_STOCK_THRESHOLD,
};
pub use taxonomy::{Brand, Category};
