//! Query results and pagination.

use serde::{Deserialize, Serialize};

/// Pagination info for a query result.
///
/// There is always at least one page, even for an empty result, and the
/// requested page is clamped into the available range rather than
/// produced out of bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed, clamped).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items across all pages.
    pub total: usize,
    /// Total number of pages (minimum 1).
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info, clamping `requested_page` to the available
    /// pages.
    ///
    /// `per_page` must be positive; callers validate it before reaching
    /// this point.
    pub fn new(requested_page: usize, per_page: usize, total: usize) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };
        let page = requested_page.clamp(1, total_pages);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Get the start offset of this page into the full item list.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// Check if on the first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on the last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number for display (1-indexed; 0 when empty).
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number for display.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }
}

/// A page of query results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResults<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> QueryResults<T> {
    /// Create new query results.
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// Check if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total number of matching items across all pages.
    pub fn total_count(&self) -> usize {
        self.pagination.total
    }
}
