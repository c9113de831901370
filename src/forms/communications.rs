use std::path::{Component, Path};

use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::communication::{
    ChatCommunicationFilters, NewChatCommunication, NewVoiceCommunication,
    UpdateChatCommunication, UpdateVoiceCommunication, VoiceCommunicationFilters,
};
use crate::forms::{
    DESCRIPTION_MAX_LEN, FormError, FormResult, empty_string_as_none, required_inline,
    required_multiline, search_term,
};

/// JSON body accepted when recording a chat message.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddChatCommunicationForm {
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub message: String,
    pub is_user_sent: bool,
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[validate(range(min = 1))]
    pub customer_id: i32,
}

impl AddChatCommunicationForm {
    /// Validates the payload; the timestamp is assigned at conversion time.
    pub fn into_new_chat_communication(self) -> FormResult<NewChatCommunication> {
        self.validate()?;

        let message = required_multiline(&self.message, "message")?;

        Ok(NewChatCommunication::new(
            message,
            self.is_user_sent,
            self.user_id,
            self.customer_id,
        ))
    }
}

/// JSON body accepted when patching a chat message.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditChatCommunicationForm {
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub message: Option<String>,
    pub is_user_sent: Option<bool>,
    #[validate(range(min = 1))]
    pub user_id: Option<i32>,
    #[validate(range(min = 1))]
    pub customer_id: Option<i32>,
}

impl EditChatCommunicationForm {
    pub fn into_update_chat_communication(self) -> FormResult<UpdateChatCommunication> {
        self.validate()?;

        let mut update = UpdateChatCommunication::default();
        if let Some(message) = self.message {
            update = update.message(required_multiline(&message, "message")?);
        }
        update.is_user_sent = self.is_user_sent;
        update.user_id = self.user_id;
        update.customer_id = self.customer_id;

        Ok(update)
    }
}

/// Query string accepted by the chat listings.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatCommunicationListQuery {
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub cursor: Option<i32>,
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i32>,
    #[validate(length(max = DESCRIPTION_MAX_LEN))]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub is_user_sent: Option<bool>,
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub user_id: Option<i32>,
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub customer_id: Option<i32>,
}

impl ChatCommunicationListQuery {
    /// Split the query into the page cursor and listing filters.
    pub fn into_parts(self) -> FormResult<(Option<i32>, ChatCommunicationFilters)> {
        self.validate()?;

        let filters = ChatCommunicationFilters {
            id: self.id,
            message: search_term(self.message),
            is_user_sent: self.is_user_sent,
            user_id: self.user_id,
            customer_id: self.customer_id,
        };

        Ok((self.cursor, filters))
    }
}

/// JSON body accepted when registering a recorded call.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddVoiceCommunicationForm {
    pub start: NaiveDateTime,
    /// Location of an already stored recording, relative to the recordings directory.
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub file_path: String,
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[validate(range(min = 1))]
    pub customer_id: i32,
}

impl AddVoiceCommunicationForm {
    pub fn into_new_voice_communication(self) -> FormResult<NewVoiceCommunication> {
        self.validate()?;

        let file_path = recording_path(&self.file_path)?;

        Ok(NewVoiceCommunication::new(
            self.start,
            file_path,
            self.user_id,
            self.customer_id,
        ))
    }
}

/// JSON body accepted when patching a recorded call.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditVoiceCommunicationForm {
    pub start: Option<NaiveDateTime>,
    #[validate(length(min = 1, max = DESCRIPTION_MAX_LEN))]
    pub file_path: Option<String>,
    #[validate(range(min = 1))]
    pub user_id: Option<i32>,
    #[validate(range(min = 1))]
    pub customer_id: Option<i32>,
}

impl EditVoiceCommunicationForm {
    pub fn into_update_voice_communication(self) -> FormResult<UpdateVoiceCommunication> {
        self.validate()?;

        let file_path = self
            .file_path
            .map(|path| recording_path(&path))
            .transpose()?;

        Ok(UpdateVoiceCommunication {
            start: self.start,
            file_path,
            user_id: self.user_id,
            customer_id: self.customer_id,
            ..UpdateVoiceCommunication::default()
        })
    }
}

/// Sanitize a recording location and keep it inside the recordings directory.
fn recording_path(value: &str) -> FormResult<String> {
    let file_path = required_inline(value, "file path")?;

    let contained = Path::new(&file_path)
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if !contained {
        return Err(FormError::UnsafePath {
            field: "file path",
            value: file_path,
        });
    }

    Ok(file_path)
}

/// Query string accepted by the voice call listings.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCommunicationListQuery {
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub cursor: Option<i32>,
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub id: Option<i32>,
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub user_id: Option<i32>,
    #[validate(range(min = 1))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub customer_id: Option<i32>,
}

impl VoiceCommunicationListQuery {
    /// Split the query into the page cursor and listing filters.
    pub fn into_parts(self) -> FormResult<(Option<i32>, VoiceCommunicationFilters)> {
        self.validate()?;

        let filters = VoiceCommunicationFilters {
            id: self.id,
            user_id: self.user_id,
            customer_id: self.customer_id,
        };

        Ok((self.cursor, filters))
    }
}
