//! Filter facets for the catalog sidebar.
//!
//! Facets enumerate the values actually present in the product list per
//! filter dimension, with counts, so the UI offers only options that can
//! match something instead of free-text guesses.

use crate::catalog::Product;
use crate::search::criteria::QueryCriteria;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A filter dimension with its available values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Facet {
    /// Display name (e.g. "Category").
    pub name: String,
    /// Criteria field this facet filters on.
    pub key: String,
    /// Available values, most frequent first.
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// Create an empty facet.
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            values: Vec::new(),
        }
    }

    /// Add a value to the facet.
    pub fn add_value(&mut self, value: impl Into<String>, count: u32, selected: bool) {
        self.values.push(FacetValue {
            value: value.into(),
            count,
            selected,
        });
    }

    /// Check if this dimension has no values in the catalog.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A single facet value with its product count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetValue {
    /// The raw filter value (an id or label, resolved for display by the
    /// caller).
    pub value: String,
    /// Number of products carrying this value.
    pub count: u32,
    /// Whether the current criteria select this value.
    pub selected: bool,
}

/// Build the category, brand, and subcategory facets for a product list.
pub(crate) fn build_facets(products: &[Product], criteria: &QueryCriteria) -> Vec<Facet> {
    let mut category = Facet::new("Category", "category");
    for (value, count) in count_values(products, |p| Some(p.category.as_str())) {
        let selected = criteria
            .category
            .as_ref()
            .map(|c| c.as_str() == value)
            .unwrap_or(false);
        category.add_value(value, count, selected);
    }

    let mut brand = Facet::new("Brand", "brand");
    for (value, count) in count_values(products, |p| Some(p.brand.as_str())) {
        let selected = criteria
            .brand
            .as_ref()
            .map(|b| b.as_str() == value)
            .unwrap_or(false);
        brand.add_value(value, count, selected);
    }

    let mut subcategory = Facet::new("Subcategory", "subcategory");
    for (value, count) in count_values(products, |p| p.subcategory.as_deref()) {
        let selected = criteria.subcategory.as_deref() == Some(value.as_str());
        subcategory.add_value(value, count, selected);
    }

    vec![category, brand, subcategory]
}

/// Count occurrences of a dimension's values, most frequent first and
/// alphabetical within equal counts.
fn count_values<'a>(
    products: &'a [Product],
    extract: impl Fn(&'a Product) -> Option<&'a str>,
) -> Vec<(String, u32)> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for product in products {
        if let Some(value) = extract(product) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let mut values: Vec<(String, u32)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    values.sort_by(|a, b| b.1.cmp(&a.1));
    values
}
