use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::db::fold_case;
use crate::domain::category::{
    Category as DomainCategory, CategoryExtended as DomainCategoryExtended, CategoryFilters,
    NewCategory as DomainNewCategory, UpdateCategory as DomainUpdateCategory,
};
use crate::models::category::{
    Category as DbCategory, CategoryWithProducts, NewCategory as DbNewCategory, UpdateCategory,
};
use crate::models::product::Product as DbProduct;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository, contains_pattern};
use crate::schema::{categories, product_categories, products};

impl CategoryReader for DieselRepository {
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<DomainCategory> {
        let mut conn = self.conn()?;

        let category = categories::table.find(id).first::<DbCategory>(&mut conn)?;

        Ok(category.into())
    }

    fn get_category_extended(&self, id: i32) -> RepositoryResult<DomainCategoryExtended> {
        let mut conn = self.conn()?;

        let category = categories::table.find(id).first::<DbCategory>(&mut conn)?;

        let products = product_categories::table
            .inner_join(products::table)
            .filter(product_categories::category_id.eq(category.id))
            .order(products::id.asc())
            .select(DbProduct::as_select())
            .load::<DbProduct>(&mut conn)?;

        Ok(CategoryWithProducts { category, products }.into())
    }

    fn list_categories(
        &self,
        cursor: Option<i32>,
        filters: &CategoryFilters,
    ) -> RepositoryResult<Vec<DomainCategory>> {
        let mut conn = self.conn()?;

        let mut items_query = categories::table.into_boxed::<Sqlite>();

        if let Some(id) = filters.id {
            items_query = items_query.filter(categories::id.eq(id));
        }

        if let Some(term) = filters.name.as_deref() {
            items_query = items_query.filter(
                fold_case(categories::name)
                    .like(contains_pattern(term))
                    .escape('\\'),
            );
        }

        if let Some(cursor) = cursor {
            let anchored =
                select(exists(categories::table.find(cursor))).get_result::<bool>(&mut conn)?;
            if !anchored {
                return Ok(Vec::new());
            }
            items_query = items_query.filter(categories::id.gt(cursor));
        }

        let categories = items_query
            .order(categories::id.asc())
            .limit(self.page_limit())
            .load::<DbCategory>(&mut conn)?;

        Ok(categories.into_iter().map(DomainCategory::from).collect())
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        let mut conn = self.conn()?;

        let insertable = DbNewCategory::from(new_category);

        let created = diesel::insert_into(categories::table)
            .values(&insertable)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.into())
    }

    fn update_category(
        &self,
        category_id: i32,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<DomainCategory> {
        let mut conn = self.conn()?;

        let db_updates = UpdateCategory::from(updates);

        let updated = diesel::update(categories::table.find(category_id))
            .set(&db_updates)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_category(&self, category_id: i32) -> RepositoryResult<DomainCategory> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(categories::table.find(category_id))
            .get_result::<DbCategory>(&mut conn)?;

        Ok(deleted.into())
    }
}

/// Fail with `NotFound` unless every id in `category_ids` exists.
pub(crate) fn ensure_categories_exist(
    conn: &mut SqliteConnection,
    category_ids: &[i32],
) -> RepositoryResult<()> {
    if category_ids.is_empty() {
        return Ok(());
    }

    let found = categories::table
        .filter(categories::id.eq_any(category_ids))
        .count()
        .get_result::<i64>(conn)?;

    if usize::try_from(found).unwrap_or_default() == category_ids.len() {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
