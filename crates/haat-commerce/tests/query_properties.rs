//! Behavioral guarantees of the query pipeline and the shipping
//! calculator that callers rely on: queries never mutate their inputs,
//! filters only ever narrow, pages partition the matched set, ties keep
//! input order, and free shipping waives the whole charge.

use haat_commerce::prelude::*;

fn build_catalog() -> Vec<Product> {
    let categories = ["cat-apparel", "cat-kitchen", "cat-electronics"];
    let brands = ["brand-walton", "brand-aarong"];

    (0..30)
        .map(|i| {
            let mut p = Product::new(
                format!("Item {:02}", i),
                Money::new(10_000 + (i as i64 % 7) * 2_500, Currency::BDT),
                CategoryId::new(categories[i % 3]),
                BrandId::new(brands[i % 2]),
            );
            p.id = ProductId::new(format!("prod-{:02}", i));
            p.discount_percent = if i % 4 == 0 { 10 } else { 0 };
            p.stock = (i as u32 % 12) * 3;
            p.rating = if i % 5 == 0 {
                None
            } else {
                Some(3.0 + (i % 3) as f64)
            };
            p.weight = Weight::from_grams(200 + (i as i64 % 5) * 150);
            if i % 3 == 0 {
                p.remark = Some("featured".to_string());
            }
            if i % 3 == 1 {
                p.subcategory = Some("essentials".to_string());
            }
            p
        })
        .collect()
}

#[test]
fn test_query_is_repeatable_and_leaves_inputs_alone() {
    let catalog = build_catalog();
    let snapshot = catalog.clone();
    let engine = CatalogEngine::new();
    let criteria = QueryCriteria::new()
        .with_search("item")
        .with_stock(StockStatus::InStock)
        .with_sort(SortKey::PriceDesc)
        .with_pagination(2, 5);

    let first = engine.query(&catalog, &criteria).unwrap();
    let second = engine.query(&catalog, &criteria).unwrap();

    assert_eq!(first, second);
    assert_eq!(catalog, snapshot);
}

#[test]
fn test_adding_filters_never_grows_the_result_set() {
    let catalog = build_catalog();
    let engine = CatalogEngine::new();
    let per_page = catalog.len() as u32;

    let mut criteria = QueryCriteria::new().with_pagination(1, per_page);
    let mut previous = engine.query(&catalog, &criteria).unwrap().total_count();
    assert_eq!(previous, catalog.len());

    let narrowing: Vec<QueryCriteria> = vec![
        criteria.clone().with_category("cat-kitchen"),
        criteria
            .clone()
            .with_category("cat-kitchen")
            .with_brand("brand-walton"),
        criteria
            .clone()
            .with_category("cat-kitchen")
            .with_brand("brand-walton")
            .with_price_range(PriceRange::new(
                Some(Money::new(12_000, Currency::BDT)),
                Some(Money::new(22_500, Currency::BDT)),
            )),
        criteria
            .clone()
            .with_category("cat-kitchen")
            .with_brand("brand-walton")
            .with_price_range(PriceRange::new(
                Some(Money::new(12_000, Currency::BDT)),
                Some(Money::new(22_500, Currency::BDT)),
            ))
            .with_discount(DiscountStatus::WithDiscount),
    ];

    for next in narrowing {
        criteria = next;
        let count = engine.query(&catalog, &criteria).unwrap().total_count();
        assert!(count <= previous, "filter grew the result set");
        previous = count;
    }
}

#[test]
fn test_pages_partition_the_matched_set() {
    let catalog = build_catalog();
    let engine = CatalogEngine::new();
    let all = engine
        .query(
            &catalog,
            &QueryCriteria::new()
                .with_sort(SortKey::PriceAsc)
                .with_pagination(1, catalog.len() as u32),
        )
        .unwrap();

    let per_page = 7u32;
    let paged = QueryCriteria::new()
        .with_sort(SortKey::PriceAsc)
        .with_pagination(1, per_page);
    let first = engine.query(&catalog, &paged).unwrap();
    assert_eq!(first.pagination.total_pages, 5);

    let mut collected: Vec<Product> = Vec::new();
    for page in 1..=first.pagination.total_pages {
        let results = engine
            .query(
                &catalog,
                &QueryCriteria::new()
                    .with_sort(SortKey::PriceAsc)
                    .with_pagination(page as u32, per_page),
            )
            .unwrap();
        assert_eq!(results.pagination.page, page);
        assert!(results.len() <= per_page as usize);
        collected.extend(results.items);
    }

    // Walking every page yields exactly the full sorted set, in order
    assert_eq!(collected, all.items);
}

#[test]
fn test_price_ties_keep_input_order() {
    let catalog = build_catalog();
    let engine = CatalogEngine::new();

    let results = engine
        .query(
            &catalog,
            &QueryCriteria::new()
                .with_sort(SortKey::PriceAsc)
                .with_pagination(1, catalog.len() as u32),
        )
        .unwrap();

    // Prices repeat every 7 items; within one price the original
    // catalog order (ascending ids here) must survive the sort.
    for pair in results.items.windows(2) {
        if pair[0].price == pair[1].price {
            assert!(pair[0].id.as_str() < pair[1].id.as_str());
        }
    }
}

#[test]
fn test_clamped_page_still_partitions() {
    let catalog = build_catalog();
    let engine = CatalogEngine::new();

    let criteria = QueryCriteria::new().with_pagination(1_000, 7);
    let results = engine.query(&catalog, &criteria).unwrap();

    assert_eq!(results.pagination.page, results.pagination.total_pages);
    assert!(!results.is_empty());
    assert!(!results.pagination.has_next);
    assert!(results.pagination.has_prev);
}

#[test]
fn test_free_shipping_waives_any_weight() {
    let method = ShippingMethod::new("Standard Delivery", Money::new(6_000, Currency::BDT))
        .with_per_kg_charge(Money::new(2_500, Currency::BDT))
        .with_free_shipping_threshold(Money::new(100_000, Currency::BDT));

    for kg in [0i64, 1, 25, 500] {
        let request = ShippingRequest::new(
            method.id.clone(),
            Money::new(100_000, Currency::BDT),
            Weight::from_grams(kg * 1_000),
        );
        let quote = method.quote(&request).unwrap();
        assert!(quote.is_free_shipping, "threshold met at {} kg", kg);
        assert!(quote.shipping_charge.is_zero());
    }
}

#[test]
fn test_threshold_boundary_is_inclusive() {
    let method = ShippingMethod::new("Standard Delivery", Money::new(6_000, Currency::BDT))
        .with_free_shipping_threshold(Money::new(100_000, Currency::BDT));

    let below = ShippingRequest::new(
        method.id.clone(),
        Money::new(99_999, Currency::BDT),
        Weight::from_grams(500),
    );
    assert!(!method.quote(&below).unwrap().is_free_shipping);

    let exact = ShippingRequest::new(
        method.id.clone(),
        Money::new(100_000, Currency::BDT),
        Weight::from_grams(500),
    );
    assert!(method.quote(&exact).unwrap().is_free_shipping);
}
