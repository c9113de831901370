use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    db::fold_case,
    domain::offer::{
        NewOffer as DomainNewOffer, NewOfferProduct as DomainNewOfferProduct,
        Offer as DomainOffer, OfferExtended as DomainOfferExtended, OfferFilters,
        UpdateOffer as DomainUpdateOffer,
    },
    models::offer::{
        NewOffer as DbNewOffer, NewOfferProduct as DbNewOfferProduct, Offer as DbOffer,
        OfferProduct as DbOfferProduct, OfferWithProducts, UpdateOffer as DbUpdateOffer,
    },
    models::product::Product as DbProduct,
    repository::errors::{RepositoryError, RepositoryResult},
    repository::product::ensure_products_exist,
    repository::{DieselRepository, OfferReader, OfferWriter, contains_pattern, unique_ids},
    schema::{offer_products, offers, products},
};

impl OfferReader for DieselRepository {
    fn get_offer_by_id(&self, id: i32) -> RepositoryResult<DomainOffer> {
        let mut conn = self.conn()?;
        let offer = offers::table.find(id).first::<DbOffer>(&mut conn)?;

        Ok(offer.into())
    }

    fn get_offer_extended(&self, id: i32) -> RepositoryResult<DomainOfferExtended> {
        let mut conn = self.conn()?;
        let offer = offers::table.find(id).first::<DbOffer>(&mut conn)?;

        let lines = DbOfferProduct::belonging_to(&offer)
            .inner_join(products::table)
            .order(offer_products::id.asc())
            .select((DbOfferProduct::as_select(), DbProduct::as_select()))
            .load::<(DbOfferProduct, DbProduct)>(&mut conn)?;

        Ok(OfferWithProducts { offer, lines }.into())
    }

    fn list_offers(
        &self,
        cursor: Option<i32>,
        filters: &OfferFilters,
    ) -> RepositoryResult<Vec<DomainOffer>> {
        let mut conn = self.conn()?;

        let mut items = filtered_offers(filters);

        if let Some(cursor) = cursor {
            let anchored =
                select(exists(offers::table.find(cursor))).get_result::<bool>(&mut conn)?;
            if !anchored {
                return Ok(Vec::new());
            }
            items = items.filter(offers::id.gt(cursor));
        }

        let db_offers = items
            .order(offers::id.asc())
            .limit(self.page_limit())
            .load::<DbOffer>(&mut conn)?;

        Ok(db_offers.into_iter().map(Into::into).collect())
    }
}

impl OfferWriter for DieselRepository {
    fn create_offer(&self, new_offer: &DomainNewOffer) -> RepositoryResult<DomainOffer> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainOffer, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(offers::table)
                .values(&DbNewOffer::from(new_offer))
                .get_result::<DbOffer>(conn)?;

            insert_lines(conn, created.id, &new_offer.offer_products)?;

            Ok(created.into())
        })
    }

    fn update_offer(
        &self,
        offer_id: i32,
        updates: &DomainUpdateOffer,
    ) -> RepositoryResult<DomainOffer> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainOffer, RepositoryError, _>(|conn| {
            let updated = diesel::update(offers::table.find(offer_id))
                .set(&DbUpdateOffer::from(updates))
                .get_result::<DbOffer>(conn)?;

            if let Some(lines) = updates.offer_products.as_ref() {
                diesel::delete(
                    offer_products::table.filter(offer_products::offer_id.eq(offer_id)),
                )
                .execute(conn)?;

                insert_lines(conn, offer_id, lines)?;
            }

            Ok(updated.into())
        })
    }

    fn delete_offer(&self, offer_id: i32) -> RepositoryResult<DomainOffer> {
        let mut conn = self.conn()?;

        // Line items go with the offer through ON DELETE CASCADE.
        let deleted =
            diesel::delete(offers::table.find(offer_id)).get_result::<DbOffer>(&mut conn)?;

        Ok(deleted.into())
    }
}

fn filtered_offers(filters: &OfferFilters) -> offers::BoxedQuery<'static, Sqlite> {
    let mut query = offers::table.into_boxed::<Sqlite>();

    if let Some(id) = filters.id {
        query = query.filter(offers::id.eq(id));
    }
    if let Some(name) = filters.name.as_deref() {
        query = query.filter(
            fold_case(offers::name)
                .like(contains_pattern(name))
                .escape('\\'),
        );
    }
    if let Some(description) = filters.description.as_deref() {
        query = query.filter(
            fold_case(offers::description)
                .like(contains_pattern(description))
                .escape('\\'),
        );
    }
    if let Some(product_ids) = filters.product_ids.as_ref().filter(|ids| !ids.is_empty()) {
        query = query.filter(
            offers::id.eq_any(
                offer_products::table
                    .filter(offer_products::product_id.eq_any(product_ids.clone()))
                    .select(offer_products::offer_id),
            ),
        );
    }

    query
}

fn insert_lines(
    conn: &mut SqliteConnection,
    offer_id: i32,
    lines: &[DomainNewOfferProduct],
) -> RepositoryResult<()> {
    if lines.is_empty() {
        return Ok(());
    }

    let product_ids: Vec<i32> = lines.iter().map(|line| line.product_id).collect();
    ensure_products_exist(conn, &unique_ids(&product_ids))?;

    let rows: Vec<DbNewOfferProduct> = lines
        .iter()
        .map(|line| DbNewOfferProduct::from_domain(offer_id, line))
        .collect();

    diesel::insert_into(offer_products::table)
        .values(&rows)
        .execute(conn)?;

    Ok(())
}
