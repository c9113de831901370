use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::domain::user::User;

/// Single chat message exchanged between an operator and a customer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatCommunication {
    pub id: i32,
    pub message: String,
    /// Moment the message was recorded, assigned by the server.
    pub timestamp: NaiveDateTime,
    /// `true` when the operator sent the message, `false` when the customer did.
    pub is_user_sent: bool,
    pub user_id: i32,
    pub customer_id: i32,
}

/// Chat message together with both participants.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatCommunicationExtended {
    pub id: i32,
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub is_user_sent: bool,
    pub user_id: i32,
    pub customer_id: i32,
    pub user: User,
    pub customer: Customer,
}

#[derive(Debug, Clone)]
pub struct NewChatCommunication {
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub is_user_sent: bool,
    pub user_id: i32,
    pub customer_id: i32,
}

impl NewChatCommunication {
    /// Build a chat message stamped with the current time.
    pub fn new(message: impl Into<String>, is_user_sent: bool, user_id: i32, customer_id: i32) -> Self {
        Self {
            message: message.into(),
            timestamp: Local::now().naive_utc(),
            is_user_sent,
            user_id,
            customer_id,
        }
    }

    /// Override the recorded timestamp.
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[derive(Debug, Clone)]
pub struct UpdateChatCommunication {
    pub message: Option<String>,
    pub is_user_sent: Option<bool>,
    pub user_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateChatCommunication {
    fn default() -> Self {
        Self {
            message: None,
            is_user_sent: None,
            user_id: None,
            customer_id: None,
            updated_at: Local::now().naive_utc(),
        }
    }
}

impl UpdateChatCommunication {
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Filters applied when listing chat messages.
#[derive(Debug, Clone, Default)]
pub struct ChatCommunicationFilters {
    pub id: Option<i32>,
    /// Case-insensitive substring of the message body.
    pub message: Option<String>,
    pub is_user_sent: Option<bool>,
    pub user_id: Option<i32>,
    pub customer_id: Option<i32>,
}

/// Recorded voice call between an operator and a customer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCommunication {
    pub id: i32,
    /// Moment the call started.
    pub start: NaiveDateTime,
    /// Location of the call recording on disk.
    pub file_path: String,
    pub user_id: i32,
    pub customer_id: i32,
}

/// Voice call together with both participants.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCommunicationExtended {
    pub id: i32,
    pub start: NaiveDateTime,
    pub file_path: String,
    pub user_id: i32,
    pub customer_id: i32,
    pub user: User,
    pub customer: Customer,
}

#[derive(Debug, Clone)]
pub struct NewVoiceCommunication {
    pub start: NaiveDateTime,
    pub file_path: String,
    pub user_id: i32,
    pub customer_id: i32,
}

impl NewVoiceCommunication {
    pub fn new(
        start: NaiveDateTime,
        file_path: impl Into<String>,
        user_id: i32,
        customer_id: i32,
    ) -> Self {
        Self {
            start,
            file_path: file_path.into(),
            user_id,
            customer_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateVoiceCommunication {
    pub start: Option<NaiveDateTime>,
    pub file_path: Option<String>,
    pub user_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateVoiceCommunication {
    fn default() -> Self {
        Self {
            start: None,
            file_path: None,
            user_id: None,
            customer_id: None,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Filters applied when listing voice calls.
#[derive(Debug, Clone, Default)]
pub struct VoiceCommunicationFilters {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub customer_id: Option<i32>,
}
