use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    db::fold_case,
    domain::communication::{
        ChatCommunication as DomainChatCommunication,
        ChatCommunicationExtended as DomainChatCommunicationExtended, ChatCommunicationFilters,
        NewChatCommunication as DomainNewChatCommunication,
        NewVoiceCommunication as DomainNewVoiceCommunication,
        UpdateChatCommunication as DomainUpdateChatCommunication,
        UpdateVoiceCommunication as DomainUpdateVoiceCommunication,
        VoiceCommunication as DomainVoiceCommunication,
        VoiceCommunicationExtended as DomainVoiceCommunicationExtended, VoiceCommunicationFilters,
    },
    models::communication::{
        ChatCommunication as DbChatCommunication, NewChatCommunication as DbNewChatCommunication,
        NewVoiceCommunication as DbNewVoiceCommunication,
        UpdateChatCommunication as DbUpdateChatCommunication,
        UpdateVoiceCommunication as DbUpdateVoiceCommunication,
        VoiceCommunication as DbVoiceCommunication,
    },
    models::customer::Customer as DbCustomer,
    models::user::User as DbUser,
    repository::customer::ensure_customers_exist,
    repository::errors::{RepositoryError, RepositoryResult},
    repository::user::ensure_users_exist,
    repository::{
        ChatCommunicationReader, ChatCommunicationWriter, DieselRepository, TimelineCursor,
        VoiceCommunicationReader, VoiceCommunicationWriter, contains_pattern, unique_ids,
    },
    schema::{chat_communications, customers, users, voice_communications},
};

impl ChatCommunicationReader for DieselRepository {
    fn get_chat_communication_by_id(&self, id: i32) -> RepositoryResult<DomainChatCommunication> {
        let mut conn = self.conn()?;
        let chat = chat_communications::table
            .find(id)
            .first::<DbChatCommunication>(&mut conn)?;

        Ok(chat.into())
    }

    fn get_chat_communication_extended(
        &self,
        id: i32,
    ) -> RepositoryResult<DomainChatCommunicationExtended> {
        let mut conn = self.conn()?;
        let extended = chat_communications::table
            .inner_join(users::table)
            .inner_join(customers::table)
            .filter(chat_communications::id.eq(id))
            .select((
                DbChatCommunication::as_select(),
                DbUser::as_select(),
                DbCustomer::as_select(),
            ))
            .first::<(DbChatCommunication, DbUser, DbCustomer)>(&mut conn)?;

        Ok(extended.into())
    }

    fn list_chat_communications(
        &self,
        cursor: Option<i32>,
        filters: &ChatCommunicationFilters,
    ) -> RepositoryResult<Vec<DomainChatCommunication>> {
        let mut conn = self.conn()?;
        let chats = load_chat_page(&mut conn, cursor, filters, self.page_limit())?;

        Ok(chats.into_iter().map(Into::into).collect())
    }

    fn list_chat_communications_extended(
        &self,
        cursor: Option<i32>,
        filters: &ChatCommunicationFilters,
    ) -> RepositoryResult<Vec<DomainChatCommunicationExtended>> {
        let mut conn = self.conn()?;
        let chats = load_chat_page(&mut conn, cursor, filters, self.page_limit())?;

        if chats.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i32> = chats.iter().map(|chat| chat.user_id).collect();
        let customer_ids: Vec<i32> = chats.iter().map(|chat| chat.customer_id).collect();
        let participants = Participants::load(&mut conn, &user_ids, &customer_ids)?;

        chats
            .into_iter()
            .map(|chat| {
                let (user, customer) = participants.of(chat.user_id, chat.customer_id)?;
                Ok(DomainChatCommunicationExtended::from((chat, user, customer)))
            })
            .collect()
    }
}

impl ChatCommunicationWriter for DieselRepository {
    fn create_chat_communication(
        &self,
        new_chat: &DomainNewChatCommunication,
    ) -> RepositoryResult<DomainChatCommunication> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainChatCommunication, RepositoryError, _>(|conn| {
            ensure_users_exist(conn, &[new_chat.user_id])?;
            ensure_customers_exist(conn, &[new_chat.customer_id])?;

            let created = diesel::insert_into(chat_communications::table)
                .values(&DbNewChatCommunication::from(new_chat))
                .get_result::<DbChatCommunication>(conn)?;

            Ok(created.into())
        })
    }

    fn update_chat_communication(
        &self,
        chat_id: i32,
        updates: &DomainUpdateChatCommunication,
    ) -> RepositoryResult<DomainChatCommunication> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainChatCommunication, RepositoryError, _>(|conn| {
            ensure_users_exist(conn, updates.user_id.as_slice())?;
            ensure_customers_exist(conn, updates.customer_id.as_slice())?;

            let updated = diesel::update(chat_communications::table.find(chat_id))
                .set(&DbUpdateChatCommunication::from(updates))
                .get_result::<DbChatCommunication>(conn)?;

            Ok(updated.into())
        })
    }

    fn delete_chat_communication(&self, chat_id: i32) -> RepositoryResult<DomainChatCommunication> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(chat_communications::table.find(chat_id))
            .get_result::<DbChatCommunication>(&mut conn)?;

        Ok(deleted.into())
    }
}

impl VoiceCommunicationReader for DieselRepository {
    fn get_voice_communication_by_id(
        &self,
        id: i32,
    ) -> RepositoryResult<DomainVoiceCommunication> {
        let mut conn = self.conn()?;
        let voice = voice_communications::table
            .find(id)
            .first::<DbVoiceCommunication>(&mut conn)?;

        Ok(voice.into())
    }

    fn get_voice_communication_extended(
        &self,
        id: i32,
    ) -> RepositoryResult<DomainVoiceCommunicationExtended> {
        let mut conn = self.conn()?;
        let extended = voice_communications::table
            .inner_join(users::table)
            .inner_join(customers::table)
            .filter(voice_communications::id.eq(id))
            .select((
                DbVoiceCommunication::as_select(),
                DbUser::as_select(),
                DbCustomer::as_select(),
            ))
            .first::<(DbVoiceCommunication, DbUser, DbCustomer)>(&mut conn)?;

        Ok(extended.into())
    }

    fn list_voice_communications(
        &self,
        cursor: Option<i32>,
        filters: &VoiceCommunicationFilters,
    ) -> RepositoryResult<Vec<DomainVoiceCommunication>> {
        let mut conn = self.conn()?;
        let voices = load_voice_page(&mut conn, cursor, filters, self.page_limit())?;

        Ok(voices.into_iter().map(Into::into).collect())
    }

    fn list_voice_communications_extended(
        &self,
        cursor: Option<i32>,
        filters: &VoiceCommunicationFilters,
    ) -> RepositoryResult<Vec<DomainVoiceCommunicationExtended>> {
        let mut conn = self.conn()?;
        let voices = load_voice_page(&mut conn, cursor, filters, self.page_limit())?;

        if voices.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i32> = voices.iter().map(|voice| voice.user_id).collect();
        let customer_ids: Vec<i32> = voices.iter().map(|voice| voice.customer_id).collect();
        let participants = Participants::load(&mut conn, &user_ids, &customer_ids)?;

        voices
            .into_iter()
            .map(|voice| {
                let (user, customer) = participants.of(voice.user_id, voice.customer_id)?;
                Ok(DomainVoiceCommunicationExtended::from((voice, user, customer)))
            })
            .collect()
    }

    fn get_voice_recording_path(&self, id: i32) -> RepositoryResult<String> {
        let mut conn = self.conn()?;

        let path = voice_communications::table
            .find(id)
            .select(voice_communications::file_path)
            .first::<String>(&mut conn)?;

        Ok(path)
    }
}

impl VoiceCommunicationWriter for DieselRepository {
    fn create_voice_communication(
        &self,
        new_voice: &DomainNewVoiceCommunication,
    ) -> RepositoryResult<DomainVoiceCommunication> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainVoiceCommunication, RepositoryError, _>(|conn| {
            ensure_users_exist(conn, &[new_voice.user_id])?;
            ensure_customers_exist(conn, &[new_voice.customer_id])?;

            let created = diesel::insert_into(voice_communications::table)
                .values(&DbNewVoiceCommunication::from(new_voice))
                .get_result::<DbVoiceCommunication>(conn)?;

            Ok(created.into())
        })
    }

    fn update_voice_communication(
        &self,
        voice_id: i32,
        updates: &DomainUpdateVoiceCommunication,
    ) -> RepositoryResult<DomainVoiceCommunication> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainVoiceCommunication, RepositoryError, _>(|conn| {
            ensure_users_exist(conn, updates.user_id.as_slice())?;
            ensure_customers_exist(conn, updates.customer_id.as_slice())?;

            let updated = diesel::update(voice_communications::table.find(voice_id))
                .set(&DbUpdateVoiceCommunication::from(updates))
                .get_result::<DbVoiceCommunication>(conn)?;

            Ok(updated.into())
        })
    }

    fn delete_voice_communication(
        &self,
        voice_id: i32,
    ) -> RepositoryResult<DomainVoiceCommunication> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(voice_communications::table.find(voice_id))
            .get_result::<DbVoiceCommunication>(&mut conn)?;

        Ok(deleted.into())
    }
}

fn filtered_chats(
    filters: &ChatCommunicationFilters,
) -> chat_communications::BoxedQuery<'static, Sqlite> {
    let mut query = chat_communications::table.into_boxed::<Sqlite>();

    if let Some(id) = filters.id {
        query = query.filter(chat_communications::id.eq(id));
    }
    if let Some(message) = filters.message.as_deref() {
        query = query.filter(
            fold_case(chat_communications::message)
                .like(contains_pattern(message))
                .escape('\\'),
        );
    }
    if let Some(is_user_sent) = filters.is_user_sent {
        query = query.filter(chat_communications::is_user_sent.eq(is_user_sent));
    }
    if let Some(user_id) = filters.user_id {
        query = query.filter(chat_communications::user_id.eq(user_id));
    }
    if let Some(customer_id) = filters.customer_id {
        query = query.filter(chat_communications::customer_id.eq(customer_id));
    }

    query
}

fn load_chat_page(
    conn: &mut SqliteConnection,
    cursor: Option<i32>,
    filters: &ChatCommunicationFilters,
    limit: i64,
) -> RepositoryResult<Vec<DbChatCommunication>> {
    let mut items = filtered_chats(filters);

    if let Some(cursor) = cursor {
        let anchor = chat_communications::table
            .find(cursor)
            .select(chat_communications::timestamp)
            .first::<NaiveDateTime>(conn)
            .optional()?;

        let Some(moment) = anchor else {
            return Ok(Vec::new());
        };
        let after = TimelineCursor { moment, id: cursor };

        items = items.filter(
            chat_communications::timestamp.lt(after.moment).or(chat_communications::timestamp
                .eq(after.moment)
                .and(chat_communications::id.lt(after.id))),
        );
    }

    let chats = items
        .order((
            chat_communications::timestamp.desc(),
            chat_communications::id.desc(),
        ))
        .limit(limit)
        .load::<DbChatCommunication>(conn)?;

    Ok(chats)
}

fn filtered_voices(
    filters: &VoiceCommunicationFilters,
) -> voice_communications::BoxedQuery<'static, Sqlite> {
    let mut query = voice_communications::table.into_boxed::<Sqlite>();

    if let Some(id) = filters.id {
        query = query.filter(voice_communications::id.eq(id));
    }
    if let Some(user_id) = filters.user_id {
        query = query.filter(voice_communications::user_id.eq(user_id));
    }
    if let Some(customer_id) = filters.customer_id {
        query = query.filter(voice_communications::customer_id.eq(customer_id));
    }

    query
}

fn load_voice_page(
    conn: &mut SqliteConnection,
    cursor: Option<i32>,
    filters: &VoiceCommunicationFilters,
    limit: i64,
) -> RepositoryResult<Vec<DbVoiceCommunication>> {
    let mut items = filtered_voices(filters);

    if let Some(cursor) = cursor {
        let anchor = voice_communications::table
            .find(cursor)
            .select(voice_communications::start)
            .first::<NaiveDateTime>(conn)
            .optional()?;

        let Some(moment) = anchor else {
            return Ok(Vec::new());
        };
        let after = TimelineCursor { moment, id: cursor };

        items = items.filter(
            voice_communications::start.lt(after.moment).or(voice_communications::start
                .eq(after.moment)
                .and(voice_communications::id.lt(after.id))),
        );
    }

    let voices = items
        .order((
            voice_communications::start.desc(),
            voice_communications::id.desc(),
        ))
        .limit(limit)
        .load::<DbVoiceCommunication>(conn)?;

    Ok(voices)
}

/// Users and customers referenced by a page of communications.
struct Participants {
    users: HashMap<i32, DbUser>,
    customers: HashMap<i32, DbCustomer>,
}

impl Participants {
    fn load(
        conn: &mut SqliteConnection,
        user_ids: &[i32],
        customer_ids: &[i32],
    ) -> RepositoryResult<Self> {
        let users = users::table
            .filter(users::id.eq_any(unique_ids(user_ids)))
            .load::<DbUser>(conn)?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let customers = customers::table
            .filter(customers::id.eq_any(unique_ids(customer_ids)))
            .load::<DbCustomer>(conn)?
            .into_iter()
            .map(|customer| (customer.id, customer))
            .collect();

        Ok(Self { users, customers })
    }

    fn of(&self, user_id: i32, customer_id: i32) -> RepositoryResult<(DbUser, DbCustomer)> {
        let user = self.users.get(&user_id).cloned();
        let customer = self.customers.get(&customer_id).cloned();

        match (user, customer) {
            (Some(user), Some(customer)) => Ok((user, customer)),
            _ => Err(RepositoryError::NotFound),
        }
    }
}

/// Chat messages of every customer in `customer_ids`, newest first.
pub(crate) fn load_chats_for_customers(
    conn: &mut SqliteConnection,
    customer_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DbChatCommunication>>> {
    if customer_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = chat_communications::table
        .filter(chat_communications::customer_id.eq_any(customer_ids))
        .order((
            chat_communications::timestamp.desc(),
            chat_communications::id.desc(),
        ))
        .load::<DbChatCommunication>(conn)?;

    let mut map: HashMap<i32, Vec<DbChatCommunication>> = HashMap::new();
    for row in rows {
        map.entry(row.customer_id).or_default().push(row);
    }

    Ok(map)
}

/// Voice calls of every customer in `customer_ids`, newest first.
pub(crate) fn load_voices_for_customers(
    conn: &mut SqliteConnection,
    customer_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DbVoiceCommunication>>> {
    if customer_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = voice_communications::table
        .filter(voice_communications::customer_id.eq_any(customer_ids))
        .order((
            voice_communications::start.desc(),
            voice_communications::id.desc(),
        ))
        .load::<DbVoiceCommunication>(conn)?;

    let mut map: HashMap<i32, Vec<DbVoiceCommunication>> = HashMap::new();
    for row in rows {
        map.entry(row.customer_id).or_default().push(row);
    }

    Ok(map)
}
