use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::offer::{
    NewOffer as DomainNewOffer, NewOfferProduct as DomainNewOfferProduct, Offer as DomainOffer,
    OfferExtended as DomainOfferExtended, OfferProduct as DomainOfferProduct,
    UpdateOffer as DomainUpdateOffer,
};
use crate::models::product::Product;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::offers)]
pub struct Offer {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::offers)]
pub struct NewOffer<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::offers)]
pub struct UpdateOffer<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::offer_products,
    belongs_to(Offer, foreign_key = offer_id)
)]
pub struct OfferProduct {
    pub id: i32,
    pub offer_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub new_price_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::offer_products)]
pub struct NewOfferProduct {
    pub offer_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub new_price_cents: i64,
}

impl NewOfferProduct {
    pub fn from_domain(offer_id: i32, line: &DomainNewOfferProduct) -> Self {
        Self {
            offer_id,
            product_id: line.product_id,
            quantity: line.quantity,
            new_price_cents: line.new_price_cents,
        }
    }
}

/// Offer row loaded with its line items and the products they reference.
#[derive(Debug, Clone)]
pub struct OfferWithProducts {
    pub offer: Offer,
    pub lines: Vec<(OfferProduct, Product)>,
}

impl From<Offer> for DomainOffer {
    fn from(value: Offer) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}

impl From<(OfferProduct, Product)> for DomainOfferProduct {
    fn from((line, product): (OfferProduct, Product)) -> Self {
        Self {
            id: line.id,
            product_id: line.product_id,
            quantity: line.quantity,
            new_price_cents: line.new_price_cents,
            product: product.into(),
        }
    }
}

impl From<OfferWithProducts> for DomainOfferExtended {
    fn from(value: OfferWithProducts) -> Self {
        let OfferWithProducts { offer, lines } = value;
        Self {
            id: offer.id,
            name: offer.name,
            description: offer.description,
            offer_products: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> From<&'a DomainNewOffer> for NewOffer<'a> {
    fn from(value: &'a DomainNewOffer) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateOffer> for UpdateOffer<'a> {
    fn from(value: &'a DomainUpdateOffer) -> Self {
        Self {
            name: value.name.as_deref(),
            description: value.description.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
