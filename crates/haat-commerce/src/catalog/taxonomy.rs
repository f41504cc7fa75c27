//! Category and brand summary records.
//!
//! The catalog is flat: products reference a single category and brand by
//! id, and these records carry the display name and slug for each.

use crate::ids::{BrandId, CategoryId};
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
}

impl Category {
    /// Create a new category.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// A product brand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Brand {
    /// Unique brand identifier.
    pub id: BrandId,
    /// Display name.
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
}

impl Brand {
    /// Create a new brand.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: BrandId::generate(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}
