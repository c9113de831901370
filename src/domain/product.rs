use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;

/// Domain representation of a product offered to customers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Longer description shown to operators.
    pub description: String,
    /// Price represented in the smallest currency unit (for example cents).
    pub price_cents: i64,
    /// Free-form product type, matched exactly by filters.
    #[serde(rename = "type")]
    pub product_type: String,
}

/// Product together with the categories it belongs to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductExtended {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    #[serde(rename = "type")]
    pub product_type: String,
    /// Categories the product is assigned to, ordered by identifier.
    pub categories: Vec<Category>,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Human-readable name of the product.
    pub name: String,
    /// Longer description shown to operators.
    pub description: String,
    /// Price represented in the smallest currency unit (for example cents).
    pub price_cents: i64,
    /// Free-form product type.
    pub product_type: String,
    /// Categories connected to the product on creation.
    pub category_ids: Vec<i32>,
}

impl NewProduct {
    /// Build a new product payload with no categories.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price_cents: i64,
        product_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price_cents,
            product_type: product_type.into(),
            category_ids: Vec::new(),
        }
    }

    /// Assign the product to the given categories.
    pub fn with_category_ids(mut self, category_ids: impl Into<Vec<i32>>) -> Self {
        self.category_ids = category_ids.into();
        self
    }
}

/// Patch data applied when updating an existing product.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional description update.
    pub description: Option<String>,
    /// Optional price update in the smallest currency unit.
    pub price_cents: Option<i64>,
    /// Optional type update.
    pub product_type: Option<String>,
    /// Replacement category set; `Some(vec![])` removes every category.
    pub category_ids: Option<Vec<i32>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            name: None,
            description: None,
            price_cents: None,
            product_type: None,
            category_ids: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Update the product name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the product description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Update the product price.
    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    /// Update the product type.
    pub fn product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    /// Replace the categories the product belongs to.
    pub fn category_ids(mut self, category_ids: impl Into<Vec<i32>>) -> Self {
        self.category_ids = Some(category_ids.into());
        self
    }
}

/// Filters applied when listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    /// Exact identifier match.
    pub id: Option<i32>,
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
    /// Exact type match.
    pub product_type: Option<String>,
    /// Inclusive lower price bound.
    pub min_price_cents: Option<i64>,
    /// Inclusive upper price bound.
    pub max_price_cents: Option<i64>,
    /// Products assigned to any of these categories.
    pub category_ids: Option<Vec<i32>>,
}

impl ProductFilters {
    /// Filter by a case-insensitive substring of the product name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Restrict results to an inclusive price range.
    pub fn price_between(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_price_cents = min;
        self.max_price_cents = max;
        self
    }

    /// Restrict results to products assigned to any of the categories.
    pub fn category_ids(mut self, category_ids: impl Into<Vec<i32>>) -> Self {
        self.category_ids = Some(category_ids.into());
        self
    }
}
