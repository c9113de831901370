use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::communication::{
    ChatCommunication as DomainChatCommunication,
    ChatCommunicationExtended as DomainChatCommunicationExtended,
    NewChatCommunication as DomainNewChatCommunication,
    NewVoiceCommunication as DomainNewVoiceCommunication,
    UpdateChatCommunication as DomainUpdateChatCommunication,
    UpdateVoiceCommunication as DomainUpdateVoiceCommunication,
    VoiceCommunication as DomainVoiceCommunication,
    VoiceCommunicationExtended as DomainVoiceCommunicationExtended,
};
use crate::models::customer::Customer;
use crate::models::user::User;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::chat_communications)]
pub struct ChatCommunication {
    pub id: i32,
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub is_user_sent: bool,
    pub user_id: i32,
    pub customer_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::chat_communications)]
pub struct NewChatCommunication<'a> {
    pub message: &'a str,
    pub timestamp: NaiveDateTime,
    pub is_user_sent: bool,
    pub user_id: i32,
    pub customer_id: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::chat_communications)]
pub struct UpdateChatCommunication<'a> {
    pub message: Option<&'a str>,
    pub is_user_sent: Option<bool>,
    pub user_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::voice_communications)]
pub struct VoiceCommunication {
    pub id: i32,
    pub start: NaiveDateTime,
    pub file_path: String,
    pub user_id: i32,
    pub customer_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::voice_communications)]
pub struct NewVoiceCommunication<'a> {
    pub start: NaiveDateTime,
    pub file_path: &'a str,
    pub user_id: i32,
    pub customer_id: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::voice_communications)]
pub struct UpdateVoiceCommunication<'a> {
    pub start: Option<NaiveDateTime>,
    pub file_path: Option<&'a str>,
    pub user_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl From<ChatCommunication> for DomainChatCommunication {
    fn from(value: ChatCommunication) -> Self {
        Self {
            id: value.id,
            message: value.message,
            timestamp: value.timestamp,
            is_user_sent: value.is_user_sent,
            user_id: value.user_id,
            customer_id: value.customer_id,
        }
    }
}

impl From<(ChatCommunication, User, Customer)> for DomainChatCommunicationExtended {
    fn from((chat, user, customer): (ChatCommunication, User, Customer)) -> Self {
        Self {
            id: chat.id,
            message: chat.message,
            timestamp: chat.timestamp,
            is_user_sent: chat.is_user_sent,
            user_id: chat.user_id,
            customer_id: chat.customer_id,
            user: user.into(),
            customer: customer.into(),
        }
    }
}

impl<'a> From<&'a DomainNewChatCommunication> for NewChatCommunication<'a> {
    fn from(value: &'a DomainNewChatCommunication) -> Self {
        Self {
            message: value.message.as_str(),
            timestamp: value.timestamp,
            is_user_sent: value.is_user_sent,
            user_id: value.user_id,
            customer_id: value.customer_id,
        }
    }
}

impl<'a> From<&'a DomainUpdateChatCommunication> for UpdateChatCommunication<'a> {
    fn from(value: &'a DomainUpdateChatCommunication) -> Self {
        Self {
            message: value.message.as_deref(),
            is_user_sent: value.is_user_sent,
            user_id: value.user_id,
            customer_id: value.customer_id,
            updated_at: value.updated_at,
        }
    }
}

impl From<VoiceCommunication> for DomainVoiceCommunication {
    fn from(value: VoiceCommunication) -> Self {
        Self {
            id: value.id,
            start: value.start,
            file_path: value.file_path,
            user_id: value.user_id,
            customer_id: value.customer_id,
        }
    }
}

impl From<(VoiceCommunication, User, Customer)> for DomainVoiceCommunicationExtended {
    fn from((voice, user, customer): (VoiceCommunication, User, Customer)) -> Self {
        Self {
            id: voice.id,
            start: voice.start,
            file_path: voice.file_path,
            user_id: voice.user_id,
            customer_id: voice.customer_id,
            user: user.into(),
            customer: customer.into(),
        }
    }
}

impl<'a> From<&'a DomainNewVoiceCommunication> for NewVoiceCommunication<'a> {
    fn from(value: &'a DomainNewVoiceCommunication) -> Self {
        Self {
            start: value.start,
            file_path: value.file_path.as_str(),
            user_id: value.user_id,
            customer_id: value.customer_id,
        }
    }
}

impl<'a> From<&'a DomainUpdateVoiceCommunication> for UpdateVoiceCommunication<'a> {
    fn from(value: &'a DomainUpdateVoiceCommunication) -> Self {
        Self {
            start: value.start,
            file_path: value.file_path.as_deref(),
            user_id: value.user_id,
            customer_id: value.customer_id,
            updated_at: value.updated_at,
        }
    }
}
