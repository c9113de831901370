use std::collections::HashMap;

use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    db::fold_case,
    domain::customer::{
        Customer as DomainCustomer, CustomerExtended as DomainCustomerExtended, CustomerFilters,
        NewCustomer as DomainNewCustomer, UpdateCustomer as DomainUpdateCustomer,
    },
    models::customer::{
        Customer as DbCustomer, CustomerProduct as DbCustomerProduct, CustomerWithRelations,
        NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
    },
    models::product::Product as DbProduct,
    repository::communication::{load_chats_for_customers, load_voices_for_customers},
    repository::errors::{RepositoryError, RepositoryResult},
    repository::product::{ensure_products_exist, with_categories},
    repository::{CustomerReader, CustomerWriter, DieselRepository, contains_pattern, unique_ids},
    schema::{customer_products, customers, products},
};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: i32) -> RepositoryResult<DomainCustomer> {
        let mut conn = self.conn()?;
        let customer = customers::table.find(id).first::<DbCustomer>(&mut conn)?;

        Ok(customer.into())
    }

    fn get_customer_extended(&self, id: i32) -> RepositoryResult<DomainCustomerExtended> {
        let mut conn = self.conn()?;
        let customer = customers::table.find(id).first::<DbCustomer>(&mut conn)?;

        let mut loaded = with_relations(&mut conn, vec![customer])?;
        loaded.pop().map(Into::into).ok_or(RepositoryError::NotFound)
    }

    fn list_customers(
        &self,
        cursor: Option<i32>,
        filters: &CustomerFilters,
    ) -> RepositoryResult<Vec<DomainCustomer>> {
        let mut conn = self.conn()?;
        let db_customers = load_customer_page(&mut conn, cursor, filters, self.page_limit())?;

        Ok(db_customers.into_iter().map(Into::into).collect())
    }

    fn list_customers_extended(
        &self,
        cursor: Option<i32>,
        filters: &CustomerFilters,
    ) -> RepositoryResult<Vec<DomainCustomerExtended>> {
        let mut conn = self.conn()?;
        let db_customers = load_customer_page(&mut conn, cursor, filters, self.page_limit())?;

        if db_customers.is_empty() {
            return Ok(Vec::new());
        }

        let loaded = with_relations(&mut conn, db_customers)?;
        Ok(loaded.into_iter().map(Into::into).collect())
    }

    fn list_customer_emails_by_products(
        &self,
        product_ids: &[i32],
    ) -> RepositoryResult<Vec<String>> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;

        let owners = customer_products::table
            .filter(customer_products::product_id.eq_any(product_ids))
            .select(customer_products::customer_id);

        let emails = customers::table
            .filter(customers::id.eq_any(owners))
            .order(customers::id.asc())
            .select(customers::email)
            .load::<String>(&mut conn)?;

        Ok(emails)
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(
        &self,
        new_customer: &DomainNewCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainCustomer, RepositoryError, _>(|conn| {
            let product_ids = unique_ids(&new_customer.product_ids);
            ensure_products_exist(conn, &product_ids)?;

            let db_new = DbNewCustomer::from(new_customer);

            let created = diesel::insert_into(customers::table)
                .values(&db_new)
                .get_result::<DbCustomer>(conn)?;

            connect_products(conn, created.id, &product_ids)?;

            Ok(created.into())
        })
    }

    fn update_customer(
        &self,
        customer_id: i32,
        updates: &DomainUpdateCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainCustomer, RepositoryError, _>(|conn| {
            let db_updates = DbUpdateCustomer::from(updates);

            let updated = diesel::update(customers::table.find(customer_id))
                .set(&db_updates)
                .get_result::<DbCustomer>(conn)?;

            if let Some(product_ids) = updates.product_ids.as_ref() {
                let product_ids = unique_ids(product_ids);
                ensure_products_exist(conn, &product_ids)?;

                diesel::delete(
                    customer_products::table
                        .filter(customer_products::customer_id.eq(customer_id)),
                )
                .execute(conn)?;

                connect_products(conn, customer_id, &product_ids)?;
            }

            Ok(updated.into())
        })
    }

    fn delete_customer(&self, customer_id: i32) -> RepositoryResult<DomainCustomer> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(customers::table.find(customer_id))
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(deleted.into())
    }
}

fn filtered_customers(filters: &CustomerFilters) -> customers::BoxedQuery<'static, Sqlite> {
    let mut query = customers::table.into_boxed::<Sqlite>();

    if let Some(id) = filters.id {
        query = query.filter(customers::id.eq(id));
    }
    if let Some(name) = filters.name.as_deref() {
        query = query.filter(
            fold_case(customers::name)
                .like(contains_pattern(name))
                .escape('\\'),
        );
    }
    if let Some(surname) = filters.surname.as_deref() {
        query = query.filter(
            fold_case(customers::surname)
                .like(contains_pattern(surname))
                .escape('\\'),
        );
    }
    if let Some(email) = filters.email.as_deref() {
        query = query.filter(
            fold_case(customers::email)
                .like(contains_pattern(email))
                .escape('\\'),
        );
    }
    if let Some(phone_number) = filters.phone_number.as_deref() {
        query = query.filter(
            fold_case(customers::phone_number)
                .like(contains_pattern(phone_number))
                .escape('\\'),
        );
    }

    query
}

fn load_customer_page(
    conn: &mut SqliteConnection,
    cursor: Option<i32>,
    filters: &CustomerFilters,
    limit: i64,
) -> RepositoryResult<Vec<DbCustomer>> {
    let mut items = filtered_customers(filters);

    if let Some(cursor) = cursor {
        let anchored = select(exists(customers::table.find(cursor))).get_result::<bool>(conn)?;
        if !anchored {
            return Ok(Vec::new());
        }
        items = items.filter(customers::id.gt(cursor));
    }

    let db_customers = items
        .order(customers::id.asc())
        .limit(limit)
        .load::<DbCustomer>(conn)?;

    Ok(db_customers)
}

fn connect_products(
    conn: &mut SqliteConnection,
    customer_id: i32,
    product_ids: &[i32],
) -> RepositoryResult<()> {
    if product_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<DbCustomerProduct> = product_ids
        .iter()
        .map(|product_id| DbCustomerProduct {
            customer_id,
            product_id: *product_id,
        })
        .collect();

    diesel::insert_into(customer_products::table)
        .values(&rows)
        .execute(conn)?;

    Ok(())
}

fn with_relations(
    conn: &mut SqliteConnection,
    db_customers: Vec<DbCustomer>,
) -> RepositoryResult<Vec<CustomerWithRelations>> {
    let customer_ids: Vec<i32> = db_customers.iter().map(|customer| customer.id).collect();

    let owned = customer_products::table
        .inner_join(products::table)
        .filter(customer_products::customer_id.eq_any(&customer_ids))
        .order((customer_products::customer_id.asc(), products::id.asc()))
        .select((customer_products::customer_id, DbProduct::as_select()))
        .load::<(i32, DbProduct)>(conn)?;

    let (owners, owned_products): (Vec<i32>, Vec<DbProduct>) = owned.into_iter().unzip();
    let owned_products = with_categories(conn, owned_products)?;

    let mut products_by_customer = HashMap::new();
    for (customer_id, product) in owners.into_iter().zip(owned_products) {
        products_by_customer
            .entry(customer_id)
            .or_insert_with(Vec::new)
            .push(product);
    }

    let mut chats_by_customer = load_chats_for_customers(conn, &customer_ids)?;
    let mut voices_by_customer = load_voices_for_customers(conn, &customer_ids)?;

    Ok(db_customers
        .into_iter()
        .map(|customer| {
            let customer_id = customer.id;
            CustomerWithRelations {
                customer,
                products: products_by_customer.remove(&customer_id).unwrap_or_default(),
                chat_communications: chats_by_customer.remove(&customer_id).unwrap_or_default(),
                voice_communications: voices_by_customer
                    .remove(&customer_id)
                    .unwrap_or_default(),
            }
        })
        .collect())
}

/// Fail with `NotFound` unless every id in `customer_ids` exists.
pub(crate) fn ensure_customers_exist(
    conn: &mut SqliteConnection,
    customer_ids: &[i32],
) -> RepositoryResult<()> {
    if customer_ids.is_empty() {
        return Ok(());
    }

    let found = customers::table
        .filter(customers::id.eq_any(customer_ids))
        .count()
        .get_result::<i64>(conn)?;

    if usize::try_from(found).unwrap_or_default() == customer_ids.len() {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
