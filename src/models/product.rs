use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct,
    ProductExtended as DomainProductExtended, UpdateProduct as DomainUpdateProduct,
};
use crate::models::category::Category;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub product_type: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price_cents: i64,
    pub product_type: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price_cents: Option<i64>,
    pub product_type: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Product row loaded with its categories.
#[derive(Debug, Clone)]
pub struct ProductWithCategories {
    pub product: Product,
    pub categories: Vec<Category>,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            price_cents: value.price_cents,
            product_type: value.product_type,
        }
    }
}

impl From<ProductWithCategories> for DomainProductExtended {
    fn from(value: ProductWithCategories) -> Self {
        let ProductWithCategories {
            product,
            categories,
        } = value;
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price_cents: product.price_cents,
            product_type: product.product_type,
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_str(),
            price_cents: value.price_cents,
            product_type: value.product_type.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            name: value.name.as_deref(),
            description: value.description.as_deref(),
            price_cents: value.price_cents,
            product_type: value.product_type.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
