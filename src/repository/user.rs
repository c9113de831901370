use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    db::fold_case,
    domain::user::{NewUser as DomainNewUser, User as DomainUser, UserFilters},
    models::user::{NewUser as DbNewUser, User as DbUser},
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, UserReader, UserWriter, contains_pattern},
    schema::users,
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<DomainUser> {
        let mut conn = self.conn()?;
        let user = users::table.find(id).first::<DbUser>(&mut conn)?;

        Ok(user.into())
    }

    fn list_users(
        &self,
        cursor: Option<i32>,
        filters: &UserFilters,
    ) -> RepositoryResult<Vec<DomainUser>> {
        let mut conn = self.conn()?;

        let mut items = filtered_users(filters);

        if let Some(cursor) = cursor {
            let anchored = select(exists(users::table.find(cursor))).get_result::<bool>(&mut conn)?;
            if !anchored {
                return Ok(Vec::new());
            }
            items = items.filter(users::id.gt(cursor));
        }

        let db_users = items
            .order(users::id.asc())
            .limit(self.page_limit())
            .load::<DbUser>(&mut conn)?;

        Ok(db_users.into_iter().map(Into::into).collect())
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        let mut conn = self.conn()?;
        let db_new = DbNewUser::from(new_user);

        let created = diesel::insert_into(users::table)
            .values(&db_new)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.into())
    }
}

fn filtered_users(filters: &UserFilters) -> users::BoxedQuery<'static, Sqlite> {
    let mut query = users::table.into_boxed::<Sqlite>();

    if let Some(id) = filters.id {
        query = query.filter(users::id.eq(id));
    }
    if let Some(name) = filters.name.as_deref() {
        query = query.filter(
            fold_case(users::name)
                .like(contains_pattern(name))
                .escape('\\'),
        );
    }
    if let Some(surname) = filters.surname.as_deref() {
        query = query.filter(
            fold_case(users::surname)
                .like(contains_pattern(surname))
                .escape('\\'),
        );
    }
    if let Some(email) = filters.email.as_deref() {
        query = query.filter(
            fold_case(users::email)
                .like(contains_pattern(email))
                .escape('\\'),
        );
    }

    query
}

/// Fail with `NotFound` unless every id in `user_ids` exists.
pub(crate) fn ensure_users_exist(
    conn: &mut SqliteConnection,
    user_ids: &[i32],
) -> RepositoryResult<()> {
    if user_ids.is_empty() {
        return Ok(());
    }

    let found = users::table
        .filter(users::id.eq_any(user_ids))
        .count()
        .get_result::<i64>(conn)?;

    if usize::try_from(found).unwrap_or_default() == user_ids.len() {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
