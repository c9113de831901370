use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, CategoryExtended as DomainCategoryExtended,
    NewCategory as DomainNewCategory, UpdateCategory as DomainUpdateCategory,
};
use crate::models::product::Product;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub name: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct UpdateCategory<'a> {
    pub name: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Row of the product/category join table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::product_categories)]
pub struct ProductCategory {
    pub product_id: i32,
    pub category_id: i32,
}

/// Category row loaded with the products assigned to it.
#[derive(Debug, Clone)]
pub struct CategoryWithProducts {
    pub category: Category,
    pub products: Vec<Product>,
}

impl From<Category> for DomainCategory {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<CategoryWithProducts> for DomainCategoryExtended {
    fn from(value: CategoryWithProducts) -> Self {
        let CategoryWithProducts { category, products } = value;
        Self {
            id: category.id,
            name: category.name,
            products: products.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> From<&'a DomainNewCategory> for NewCategory<'a> {
    fn from(value: &'a DomainNewCategory) -> Self {
        Self {
            name: value.name.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateCategory> for UpdateCategory<'a> {
    fn from(value: &'a DomainUpdateCategory) -> Self {
        Self {
            name: value.name.as_deref(),
            updated_at: value.updated_at,
        }
    }
}
