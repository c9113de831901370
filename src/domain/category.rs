use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Domain representation of a product category.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Human-readable name, unique across categories.
    pub name: String,
}

/// Category together with the products assigned to it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExtended {
    pub id: i32,
    pub name: String,
    pub products: Vec<Product>,
}

/// Payload required to insert a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Patch data applied when updating an existing category.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    /// New name; `None` keeps the current one.
    pub name: Option<String>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateCategory {
    /// Build a category update payload with the supplied values.
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Filters applied when listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilters {
    pub id: Option<i32>,
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
}
