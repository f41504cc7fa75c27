//! In-memory catalog query engine.
//!
//! Runs filter, sort, and paginate stages over a product slice in a fixed
//! order: search term, exact-match filters (category, brand, subcategory,
//! remark), price range, stock status, discount status, then a stable
//! sort and pagination. Every stage narrows the previous stage's output,
//! so adding a filter can never grow the result set.
//!
//! The engine is a pure function of its inputs: it performs no I/O,
//! never mutates the product slice or the criteria, and identical calls
//! return identical results.

use crate::catalog::{Product, DEFAULT_LOW_STOCK_THRESHOLD};
use crate::error::CommerceError;
use crate::search::criteria::{QueryCriteria, SortKey};
use crate::search::facets::{build_facets, Facet};
use crate::search::results::{Pagination, QueryResults};
use tracing::debug;

/// The catalog query engine.
///
/// Stateless apart from its configuration; one engine can serve any
/// number of queries over any product list.
#[derive(Debug, Clone)]
pub struct CatalogEngine {
    low_stock_threshold: u32,
}

impl CatalogEngine {
    /// Create an engine with the default low-stock threshold.
    pub fn new() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    /// Override the unit count at or below which stock counts as low.
    pub fn with_low_stock_threshold(mut self, threshold: u32) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    /// The configured low-stock threshold.
    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    /// Filter, sort, and paginate a product list.
    ///
    /// Fails only on malformed criteria (zero page size); an out-of-range
    /// page is clamped, not rejected.
    pub fn query(
        &self,
        products: &[Product],
        criteria: &QueryCriteria,
    ) -> Result<QueryResults<Product>, CommerceError> {
        criteria.validate()?;

        let mut filtered: Vec<&Product> = products.iter().collect();

        if let Some(term) = criteria.search_term() {
            let needle = term.to_lowercase();
            filtered.retain(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.short_description.to_lowercase().contains(&needle)
            });
        }
        if let Some(category) = &criteria.category {
            filtered.retain(|p| &p.category == category);
        }
        if let Some(brand) = &criteria.brand {
            filtered.retain(|p| &p.brand == brand);
        }
        if let Some(subcategory) = &criteria.subcategory {
            filtered.retain(|p| p.subcategory.as_deref() == Some(subcategory.as_str()));
        }
        if let Some(remark) = &criteria.remark {
            filtered.retain(|p| p.remark.as_deref() == Some(remark.as_str()));
        }
        if !criteria.price_range.is_unbounded() {
            filtered.retain(|p| criteria.price_range.contains(p.price));
        }
        if let Some(stock) = criteria.stock {
            filtered.retain(|p| p.stock_status(self.low_stock_threshold) == stock);
        }
        if let Some(discount) = criteria.discount {
            filtered.retain(|p| p.discount_status() == discount);
        }

        sort_products(&mut filtered, criteria.sort);

        let total = filtered.len();
        let pagination = Pagination::new(criteria.page as usize, criteria.per_page as usize, total);
        let start = pagination.offset().min(total);
        let end = (start + pagination.per_page).min(total);
        let items: Vec<Product> = filtered[start..end].iter().map(|p| (*p).clone()).collect();

        debug!(
            "catalog query: {} of {} products matched, page {}/{}, sort {}",
            total,
            products.len(),
            pagination.page,
            pagination.total_pages,
            criteria.sort.as_str()
        );

        Ok(QueryResults::new(items, pagination))
    }

    /// Build filter facets (category, brand, subcategory) for a product
    /// list, marking the values the criteria currently select.
    pub fn facets(&self, products: &[Product], criteria: &QueryCriteria) -> Vec<Facet> {
        build_facets(products, criteria)
    }
}

impl Default for CatalogEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable sort; equal keys keep their relative input order.
fn sort_products(products: &mut [&Product], sort: SortKey) {
    match sort {
        SortKey::Name => products.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        }),
        SortKey::PriceAsc => {
            products.sort_by(|a, b| a.price.amount_cents.cmp(&b.price.amount_cents))
        }
        SortKey::PriceDesc => {
            products.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents))
        }
        SortKey::Rating => {
            products.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DiscountStatus, StockStatus};
    use crate::ids::{BrandId, CategoryId, ProductId};
    use crate::money::{Currency, Money};
    use crate::search::criteria::PriceRange;
    use crate::weight::Weight;

    fn product(title: &str, price_cents: i64, discount: u8, stock: u32) -> Product {
        let mut p = Product::new(
            title,
            Money::new(price_cents, Currency::BDT),
            CategoryId::new("cat-general"),
            BrandId::new("brand-generic"),
        );
        p.id = ProductId::new(format!("prod-{}", title.to_lowercase().replace(' ', "-")));
        p.discount_percent = discount;
        p.stock = stock;
        p.weight = Weight::from_grams(500);
        p
    }

    fn sample_catalog() -> Vec<Product> {
        let mut phone = product("iPhone 15", 100_000, 10, 0);
        phone.category = CategoryId::new("cat-electronics");
        phone.brand = BrandId::new("brand-apple");
        phone.short_description = "Latest flagship phone".to_string();
        phone.rating = Some(4.8);

        let mut tablet = product("iPad", 50_000, 0, 20);
        tablet.category = CategoryId::new("cat-electronics");
        tablet.brand = BrandId::new("brand-apple");
        tablet.short_description = "Portable tablet".to_string();
        tablet.rating = Some(4.5);

        let mut laptop = product("Galaxy Book", 80_000, 5, 7);
        laptop.category = CategoryId::new("cat-computers");
        laptop.brand = BrandId::new("brand-samsung");
        laptop.subcategory = Some("laptops".to_string());
        laptop.remark = Some("featured".to_string());

        vec![phone, tablet, laptop]
    }

    fn titles(results: &QueryResults<Product>) -> Vec<&str> {
        results.items.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let engine = CatalogEngine::new();
        let catalog = sample_catalog();
        let results = engine.query(&catalog, &QueryCriteria::new()).unwrap();

        assert_eq!(results.total_count(), 3);
        assert_eq!(results.pagination.total_pages, 1);
    }

    #[test]
    fn test_search_matches_title_and_description() {
        let engine = CatalogEngine::new();
        let catalog = sample_catalog();

        let by_title = engine
            .query(&catalog, &QueryCriteria::new().with_search("ipad"))
            .unwrap();
        assert_eq!(titles(&by_title), vec!["iPad"]);

        let by_description = engine
            .query(&catalog, &QueryCriteria::new().with_search("FLAGSHIP"))
            .unwrap();
        assert_eq!(titles(&by_description), vec!["iPhone 15"]);
    }

    #[test]
    fn test_exact_filters_combine_with_and() {
        let engine = CatalogEngine::new();
        let catalog = sample_catalog();

        let criteria = QueryCriteria::new()
            .with_category("cat-electronics")
            .with_brand("brand-apple");
        let results = engine.query(&catalog, &criteria).unwrap();
        assert_eq!(results.total_count(), 2);

        let criteria = QueryCriteria::new()
            .with_category("cat-electronics")
            .with_brand("brand-samsung");
        let results = engine.query(&catalog, &criteria).unwrap();
        assert_eq!(results.total_count(), 0);
    }

    #[test]
    fn test_subcategory_and_remark_filters() {
        let engine = CatalogEngine::new();
        let catalog = sample_catalog();

        let results = engine
            .query(&catalog, &QueryCriteria::new().with_subcategory("laptops"))
            .unwrap();
        assert_eq!(titles(&results), vec!["Galaxy Book"]);

        let results = engine
            .query(&catalog, &QueryCriteria::new().with_remark("featured"))
            .unwrap();
        assert_eq!(titles(&results), vec!["Galaxy Book"]);

        let results = engine
            .query(&catalog, &QueryCriteria::new().with_remark("clearance"))
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_out_of_stock_filter() {
        let engine = CatalogEngine::new();
        let catalog = sample_catalog();

        let results = engine
            .query(
                &catalog,
                &QueryCriteria::new().with_stock(StockStatus::OutOfStock),
            )
            .unwrap();
        assert_eq!(titles(&results), vec!["iPhone 15"]);
    }

    #[test]
    fn test_low_stock_uses_engine_threshold() {
        let catalog = sample_catalog();
        let criteria = QueryCriteria::new().with_stock(StockStatus::LowStock);

        // Galaxy Book has 7 units: low under the default threshold of 10
        let results = CatalogEngine::new().query(&catalog, &criteria).unwrap();
        assert_eq!(titles(&results), vec!["Galaxy Book"]);

        // With a threshold of 5 the same product counts as in stock
        let engine = CatalogEngine::new().with_low_stock_threshold(5);
        assert_eq!(engine.low_stock_threshold(), 5);
        let results = engine.query(&catalog, &criteria).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let engine = CatalogEngine::new();
        let catalog = sample_catalog();

        let criteria = QueryCriteria::new().with_price_range(PriceRange::new(
            Some(Money::new(60_000, Currency::BDT)),
            None,
        ));
        let results = engine.query(&catalog, &criteria).unwrap();
        assert_eq!(titles(&results), vec!["Galaxy Book", "iPhone 15"]);

        let criteria = QueryCriteria::new().with_price_range(PriceRange::new(
            Some(Money::new(50_000, Currency::BDT)),
            Some(Money::new(50_000, Currency::BDT)),
        ));
        let results = engine.query(&catalog, &criteria).unwrap();
        assert_eq!(titles(&results), vec!["iPad"]);
    }

    #[test]
    fn test_min_bound_alone_from_form_input() {
        let engine = CatalogEngine::new();
        let catalog = vec![
            product("iPhone 15", 100_000, 10, 0),
            product("iPad", 50_000, 0, 20),
        ];

        let criteria = QueryCriteria::new()
            .with_price_range(PriceRange::parse("600", "", Currency::BDT));
        let results = engine.query(&catalog, &criteria).unwrap();
        assert_eq!(titles(&results), vec!["iPhone 15"]);
    }

    #[test]
    fn test_discount_filter() {
        let engine = CatalogEngine::new();
        let catalog = sample_catalog();

        let with = engine
            .query(
                &catalog,
                &QueryCriteria::new().with_discount(DiscountStatus::WithDiscount),
            )
            .unwrap();
        assert_eq!(with.total_count(), 2);

        let without = engine
            .query(
                &catalog,
                &QueryCriteria::new().with_discount(DiscountStatus::WithoutDiscount),
            )
            .unwrap();
        assert_eq!(titles(&without), vec!["iPad"]);
    }

    #[test]
    fn test_sort_by_name_folds_case() {
        let engine = CatalogEngine::new();
        let catalog = vec![
            product("banana stand", 100, 0, 1),
            product("Apple slicer", 100, 0, 1),
            product("Cherry pitter", 100, 0, 1),
        ];

        let results = engine
            .query(&catalog, &QueryCriteria::new().with_sort(SortKey::Name))
            .unwrap();
        assert_eq!(
            titles(&results),
            vec!["Apple slicer", "banana stand", "Cherry pitter"]
        );
    }

    #[test]
    fn test_sort_by_price() {
        let engine = CatalogEngine::new();
        let catalog = sample_catalog();

        let asc = engine
            .query(&catalog, &QueryCriteria::new().with_sort(SortKey::PriceAsc))
            .unwrap();
        assert_eq!(titles(&asc), vec!["iPad", "Galaxy Book", "iPhone 15"]);

        let desc = engine
            .query(&catalog, &QueryCriteria::new().with_sort(SortKey::PriceDesc))
            .unwrap();
        assert_eq!(titles(&desc), vec!["iPhone 15", "Galaxy Book", "iPad"]);
    }

    #[test]
    fn test_sort_by_rating_treats_missing_as_zero() {
        let engine = CatalogEngine::new();
        // Galaxy Book has no rating and must sort last
        let results = engine
            .query(
                &sample_catalog(),
                &QueryCriteria::new().with_sort(SortKey::Rating),
            )
            .unwrap();
        assert_eq!(titles(&results), vec!["iPhone 15", "iPad", "Galaxy Book"]);
    }

    #[test]
    fn test_rating_ties_keep_input_order() {
        let engine = CatalogEngine::new();
        let mut first = product("First", 100, 0, 1);
        first.rating = Some(4.0);
        let mut second = product("Second", 200, 0, 1);
        second.rating = Some(4.0);
        let mut third = product("Third", 300, 0, 1);
        third.rating = Some(4.5);

        let catalog = vec![first, second, third];
        let results = engine
            .query(&catalog, &QueryCriteria::new().with_sort(SortKey::Rating))
            .unwrap();
        assert_eq!(titles(&results), vec!["Third", "First", "Second"]);
    }

    #[test]
    fn test_pagination_slices_sorted_set() {
        let engine = CatalogEngine::new();
        let catalog: Vec<Product> = (1..=5)
            .map(|i| product(&format!("Item {}", i), i * 100, 0, 1))
            .collect();

        let criteria = QueryCriteria::new()
            .with_sort(SortKey::PriceAsc)
            .with_pagination(2, 2);
        let results = engine.query(&catalog, &criteria).unwrap();

        assert_eq!(titles(&results), vec!["Item 3", "Item 4"]);
        assert_eq!(results.pagination.total_pages, 3);
        assert!(results.pagination.has_next);
        assert!(results.pagination.has_prev);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let engine = CatalogEngine::new();
        let catalog = sample_catalog();

        let criteria = QueryCriteria::new().with_pagination(99, 2);
        let results = engine.query(&catalog, &criteria).unwrap();

        assert_eq!(results.pagination.page, 2);
        assert_eq!(results.len(), 1);
        assert!(!results.pagination.has_next);
    }

    #[test]
    fn test_zero_page_size_is_an_error() {
        let engine = CatalogEngine::new();
        let criteria = QueryCriteria::new().with_pagination(1, 0);
        let err = engine.query(&sample_catalog(), &criteria).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_empty_catalog() {
        let engine = CatalogEngine::new();
        let results = engine.query(&[], &QueryCriteria::new()).unwrap();

        assert!(results.is_empty());
        assert_eq!(results.pagination.total_pages, 1);
        assert!(!results.pagination.has_next);
        assert!(!results.pagination.has_prev);
    }

    #[test]
    fn test_search_and_stock_narrow_together() {
        let engine = CatalogEngine::new();
        let catalog = sample_catalog();

        // "i" matches iPhone and iPad; out-of-stock narrows to iPhone
        let criteria = QueryCriteria::new()
            .with_search("i")
            .with_stock(StockStatus::OutOfStock);
        let results = engine.query(&catalog, &criteria).unwrap();
        assert_eq!(titles(&results), vec!["iPhone 15"]);
    }
}
