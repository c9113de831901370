use std::collections::HashMap;

use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    db::fold_case,
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct,
        ProductExtended as DomainProductExtended, ProductFilters,
        UpdateProduct as DomainUpdateProduct,
    },
    models::category::{Category as DbCategory, ProductCategory as DbProductCategory},
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, ProductWithCategories,
        UpdateProduct as DbUpdateProduct,
    },
    repository::category::ensure_categories_exist,
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, ProductReader, ProductWriter, contains_pattern, unique_ids},
    schema::{categories, offer_products, product_categories, products},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;
        let product = products::table.find(id).first::<DbProduct>(&mut conn)?;

        Ok(product.into())
    }

    fn get_product_extended(&self, id: i32) -> RepositoryResult<DomainProductExtended> {
        let mut conn = self.conn()?;
        let product = products::table.find(id).first::<DbProduct>(&mut conn)?;

        let mut loaded = with_categories(&mut conn, vec![product])?;
        loaded.pop().map(Into::into).ok_or(RepositoryError::NotFound)
    }

    fn list_products(
        &self,
        cursor: Option<i32>,
        filters: &ProductFilters,
    ) -> RepositoryResult<Vec<DomainProduct>> {
        let mut conn = self.conn()?;
        let db_products = load_product_page(&mut conn, cursor, filters, self.page_limit())?;

        Ok(db_products.into_iter().map(Into::into).collect())
    }

    fn list_products_extended(
        &self,
        cursor: Option<i32>,
        filters: &ProductFilters,
    ) -> RepositoryResult<Vec<DomainProductExtended>> {
        let mut conn = self.conn()?;
        let db_products = load_product_page(&mut conn, cursor, filters, self.page_limit())?;

        if db_products.is_empty() {
            return Ok(Vec::new());
        }

        let loaded = with_categories(&mut conn, db_products)?;
        Ok(loaded.into_iter().map(Into::into).collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let category_ids = unique_ids(&new_product.category_ids);
            ensure_categories_exist(conn, &category_ids)?;

            let db_new = DbNewProduct::from(new_product);
            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            connect_categories(conn, created.id, &category_ids)?;

            Ok(created.into())
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateProduct::from(updates);

            let updated = diesel::update(products::table.find(product_id))
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;

            if let Some(category_ids) = updates.category_ids.as_ref() {
                let category_ids = unique_ids(category_ids);
                ensure_categories_exist(conn, &category_ids)?;

                diesel::delete(
                    product_categories::table
                        .filter(product_categories::product_id.eq(product_id)),
                )
                .execute(conn)?;

                connect_categories(conn, product_id, &category_ids)?;
            }

            Ok(updated.into())
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;

        // The write lock is taken on BEGIN so no offer line can reference the
        // product between the check and the delete.
        conn.immediate_transaction::<DomainProduct, RepositoryError, _>(|conn| {
            let referenced = select(exists(
                offer_products::table.filter(offer_products::product_id.eq(product_id)),
            ))
            .get_result::<bool>(conn)?;

            if referenced {
                return Err(RepositoryError::Conflict(format!(
                    "product {product_id} is used by at least one offer"
                )));
            }

            let deleted = diesel::delete(products::table.find(product_id))
                .get_result::<DbProduct>(conn)?;

            Ok(deleted.into())
        })
    }
}

fn filtered_products(filters: &ProductFilters) -> products::BoxedQuery<'static, Sqlite> {
    let mut query = products::table.into_boxed::<Sqlite>();

    if let Some(id) = filters.id {
        query = query.filter(products::id.eq(id));
    }
    if let Some(name) = filters.name.as_deref() {
        query = query.filter(
            fold_case(products::name)
                .like(contains_pattern(name))
                .escape('\\'),
        );
    }
    if let Some(description) = filters.description.as_deref() {
        query = query.filter(
            fold_case(products::description)
                .like(contains_pattern(description))
                .escape('\\'),
        );
    }
    if let Some(product_type) = filters.product_type.clone() {
        query = query.filter(products::product_type.eq(product_type));
    }
    if let Some(min) = filters.min_price_cents {
        query = query.filter(products::price_cents.ge(min));
    }
    if let Some(max) = filters.max_price_cents {
        query = query.filter(products::price_cents.le(max));
    }
    if let Some(category_ids) = filters.category_ids.as_ref().filter(|ids| !ids.is_empty()) {
        query = query.filter(
            products::id.eq_any(
                product_categories::table
                    .filter(product_categories::category_id.eq_any(category_ids.clone()))
                    .select(product_categories::product_id),
            ),
        );
    }

    query
}

fn load_product_page(
    conn: &mut SqliteConnection,
    cursor: Option<i32>,
    filters: &ProductFilters,
    limit: i64,
) -> RepositoryResult<Vec<DbProduct>> {
    let mut items = filtered_products(filters);

    if let Some(cursor) = cursor {
        let anchored = select(exists(products::table.find(cursor))).get_result::<bool>(conn)?;
        if !anchored {
            return Ok(Vec::new());
        }
        items = items.filter(products::id.gt(cursor));
    }

    let db_products = items
        .order(products::id.asc())
        .limit(limit)
        .load::<DbProduct>(conn)?;

    Ok(db_products)
}

fn connect_categories(
    conn: &mut SqliteConnection,
    product_id: i32,
    category_ids: &[i32],
) -> RepositoryResult<()> {
    if category_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<DbProductCategory> = category_ids
        .iter()
        .map(|category_id| DbProductCategory {
            product_id,
            category_id: *category_id,
        })
        .collect();

    diesel::insert_into(product_categories::table)
        .values(&rows)
        .execute(conn)?;

    Ok(())
}

/// Categories of every product in `product_ids`, keyed by product and ordered by id.
pub(crate) fn load_categories_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DbCategory>>> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = product_categories::table
        .inner_join(categories::table)
        .filter(product_categories::product_id.eq_any(product_ids))
        .order(categories::id.asc())
        .select((product_categories::product_id, DbCategory::as_select()))
        .load::<(i32, DbCategory)>(conn)?;

    let mut map: HashMap<i32, Vec<DbCategory>> = HashMap::new();
    for (product_id, category) in rows {
        map.entry(product_id).or_default().push(category);
    }

    Ok(map)
}

/// Pair each product row with its categories.
pub(crate) fn with_categories(
    conn: &mut SqliteConnection,
    db_products: Vec<DbProduct>,
) -> RepositoryResult<Vec<ProductWithCategories>> {
    let product_ids: Vec<i32> = db_products.iter().map(|product| product.id).collect();
    let categories_by_product = load_categories_for_products(conn, &unique_ids(&product_ids))?;

    Ok(db_products
        .into_iter()
        .map(|product| {
            let categories = categories_by_product
                .get(&product.id)
                .cloned()
                .unwrap_or_default();
            ProductWithCategories {
                product,
                categories,
            }
        })
        .collect())
}

/// Fail with `NotFound` unless every id in `product_ids` exists.
pub(crate) fn ensure_products_exist(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<()> {
    if product_ids.is_empty() {
        return Ok(());
    }

    let found = products::table
        .filter(products::id.eq_any(product_ids))
        .count()
        .get_result::<i64>(conn)?;

    if usize::try_from(found).unwrap_or_default() == product_ids.len() {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
