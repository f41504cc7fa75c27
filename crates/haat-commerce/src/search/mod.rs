//! Catalog query module.
//!
//! Contains the query criteria, the in-memory filter/sort/paginate
//! engine, result pagination, and filter facets.

mod criteria;
mod engine;
mod facets;
mod results;

pub use criteria::{PriceRange, QueryCriteria, SortKey, DEFAULT_PER_PAGE};
pub use engine::CatalogEngine;
pub use facets::{Facet, FacetValue};
pub use results::{Pagination, QueryResults};
