use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Promotional offer bundling products at adjusted prices.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Unique identifier of the offer.
    pub id: i32,
    /// Human-readable name of the offer.
    pub name: String,
    /// Description presented to customers.
    pub description: String,
}

/// Line item of an offer together with the referenced product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OfferProduct {
    /// Unique identifier of the line item.
    pub id: i32,
    /// Referenced product.
    pub product_id: i32,
    /// Number of product units included in the offer.
    pub quantity: i32,
    /// Offer price per unit in the smallest currency unit.
    pub new_price_cents: i64,
    /// Product the line refers to.
    pub product: Product,
}

/// Offer together with its line items.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OfferExtended {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Line items in insertion order.
    pub offer_products: Vec<OfferProduct>,
}

/// Line item supplied when creating or replacing offer contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOfferProduct {
    pub product_id: i32,
    pub quantity: i32,
    pub new_price_cents: i64,
}

impl NewOfferProduct {
    pub fn new(product_id: i32, quantity: i32, new_price_cents: i64) -> Self {
        Self {
            product_id,
            quantity,
            new_price_cents,
        }
    }
}

/// Payload required to insert a new offer with its line items.
#[derive(Debug, Clone)]
pub struct NewOffer {
    pub name: String,
    pub description: String,
    pub offer_products: Vec<NewOfferProduct>,
}

impl NewOffer {
    /// Build a new offer payload without line items.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            offer_products: Vec::new(),
        }
    }

    /// Attach line items to the offer.
    pub fn with_products(mut self, offer_products: impl Into<Vec<NewOfferProduct>>) -> Self {
        self.offer_products = offer_products.into();
        self
    }
}

/// Patch data applied when updating an existing offer.
#[derive(Debug, Clone)]
pub struct UpdateOffer {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Replacement line items; `Some(vec![])` empties the offer.
    pub offer_products: Option<Vec<NewOfferProduct>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateOffer {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateOffer {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self {
            name: None,
            description: None,
            offer_products: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace every line item of the offer.
    pub fn offer_products(mut self, offer_products: impl Into<Vec<NewOfferProduct>>) -> Self {
        self.offer_products = Some(offer_products.into());
        self
    }
}

/// Filters applied when listing offers.
#[derive(Debug, Clone, Default)]
pub struct OfferFilters {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Offers containing any of these products.
    pub product_ids: Option<Vec<i32>>,
}
