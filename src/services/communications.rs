use std::io;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::communication::{
    ChatCommunication, ChatCommunicationExtended, VoiceCommunication, VoiceCommunicationExtended,
};
use crate::forms::communications::{
    AddChatCommunicationForm, AddVoiceCommunicationForm, ChatCommunicationListQuery,
    EditChatCommunicationForm, EditVoiceCommunicationForm, VoiceCommunicationListQuery,
};
use crate::repository::{
    ChatCommunicationReader, ChatCommunicationWriter, VoiceCommunicationReader,
    VoiceCommunicationWriter,
};
use crate::services::ServiceResult;

/// Outcome of deleting a voice call together with its recording.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCommunicationRemoval {
    /// The deleted record.
    pub communication: VoiceCommunication,
    /// Set when the record was deleted but the recording could not be removed.
    pub recording_error: Option<String>,
}

/// Location of a stored recording.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRecordingPath {
    pub file_path: String,
}

/// Directory that owns every call recording.
///
/// Stored recording paths are resolved against the root, and nothing that
/// resolves outside of it is ever removed.
#[derive(Debug, Clone)]
pub struct RecordingStore {
    root: PathBuf,
}

impl RecordingStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Canonical location of `file_path`, refusing anything outside the root.
    pub fn resolve(&self, file_path: &str) -> io::Result<PathBuf> {
        let root = self.root.canonicalize()?;
        let resolved = root.join(file_path).canonicalize()?;

        if !resolved.starts_with(&root) || resolved == root {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("`{file_path}` is outside the recordings directory"),
            ));
        }

        Ok(resolved)
    }

    /// Unlink a stored recording.
    pub fn remove(&self, file_path: &str) -> io::Result<()> {
        std::fs::remove_file(self.resolve(file_path)?)
    }
}

/// Returns one page of chat messages, newest first.
pub fn list_chat_communications<R>(
    repo: &R,
    query: ChatCommunicationListQuery,
) -> ServiceResult<Vec<ChatCommunication>>
where
    R: ChatCommunicationReader + ?Sized,
{
    let (cursor, filters) = query.into_parts()?;
    Ok(repo.list_chat_communications(cursor, &filters)?)
}

/// Returns one page of chat messages with both participants.
pub fn list_chat_communications_extended<R>(
    repo: &R,
    query: ChatCommunicationListQuery,
) -> ServiceResult<Vec<ChatCommunicationExtended>>
where
    R: ChatCommunicationReader + ?Sized,
{
    let (cursor, filters) = query.into_parts()?;
    Ok(repo.list_chat_communications_extended(cursor, &filters)?)
}

pub fn get_chat_communication<R>(repo: &R, chat_id: i32) -> ServiceResult<ChatCommunication>
where
    R: ChatCommunicationReader + ?Sized,
{
    Ok(repo.get_chat_communication_by_id(chat_id)?)
}

pub fn get_chat_communication_extended<R>(
    repo: &R,
    chat_id: i32,
) -> ServiceResult<ChatCommunicationExtended>
where
    R: ChatCommunicationReader + ?Sized,
{
    Ok(repo.get_chat_communication_extended(chat_id)?)
}

pub fn create_chat_communication<R>(
    repo: &R,
    form: AddChatCommunicationForm,
) -> ServiceResult<ChatCommunication>
where
    R: ChatCommunicationWriter + ?Sized,
{
    let new_chat = form.into_new_chat_communication()?;
    Ok(repo.create_chat_communication(&new_chat)?)
}

pub fn update_chat_communication<R>(
    repo: &R,
    chat_id: i32,
    form: EditChatCommunicationForm,
) -> ServiceResult<ChatCommunication>
where
    R: ChatCommunicationWriter + ?Sized,
{
    let updates = form.into_update_chat_communication()?;
    Ok(repo.update_chat_communication(chat_id, &updates)?)
}

pub fn delete_chat_communication<R>(repo: &R, chat_id: i32) -> ServiceResult<ChatCommunication>
where
    R: ChatCommunicationWriter + ?Sized,
{
    Ok(repo.delete_chat_communication(chat_id)?)
}

/// Returns one page of voice calls, newest first.
pub fn list_voice_communications<R>(
    repo: &R,
    query: VoiceCommunicationListQuery,
) -> ServiceResult<Vec<VoiceCommunication>>
where
    R: VoiceCommunicationReader + ?Sized,
{
    let (cursor, filters) = query.into_parts()?;
    Ok(repo.list_voice_communications(cursor, &filters)?)
}

pub fn list_voice_communications_extended<R>(
    repo: &R,
    query: VoiceCommunicationListQuery,
) -> ServiceResult<Vec<VoiceCommunicationExtended>>
where
    R: VoiceCommunicationReader + ?Sized,
{
    let (cursor, filters) = query.into_parts()?;
    Ok(repo.list_voice_communications_extended(cursor, &filters)?)
}

pub fn get_voice_communication<R>(repo: &R, voice_id: i32) -> ServiceResult<VoiceCommunication>
where
    R: VoiceCommunicationReader + ?Sized,
{
    Ok(repo.get_voice_communication_by_id(voice_id)?)
}

pub fn get_voice_communication_extended<R>(
    repo: &R,
    voice_id: i32,
) -> ServiceResult<VoiceCommunicationExtended>
where
    R: VoiceCommunicationReader + ?Sized,
{
    Ok(repo.get_voice_communication_extended(voice_id)?)
}

pub fn get_voice_recording_path<R>(repo: &R, voice_id: i32) -> ServiceResult<VoiceRecordingPath>
where
    R: VoiceCommunicationReader + ?Sized,
{
    let file_path = repo.get_voice_recording_path(voice_id)?;
    Ok(VoiceRecordingPath { file_path })
}

pub fn create_voice_communication<R>(
    repo: &R,
    form: AddVoiceCommunicationForm,
) -> ServiceResult<VoiceCommunication>
where
    R: VoiceCommunicationWriter + ?Sized,
{
    let new_voice = form.into_new_voice_communication()?;
    Ok(repo.create_voice_communication(&new_voice)?)
}

pub fn update_voice_communication<R>(
    repo: &R,
    voice_id: i32,
    form: EditVoiceCommunicationForm,
) -> ServiceResult<VoiceCommunication>
where
    R: VoiceCommunicationWriter + ?Sized,
{
    let updates = form.into_update_voice_communication()?;
    Ok(repo.update_voice_communication(voice_id, &updates)?)
}

/// Deletes a voice call and then removes its recording from disk.
///
/// The record deletion is committed before the file is touched. A failed
/// unlink, including a path that resolves outside `recordings`, is logged and
/// reported in the result; the record stays deleted.
pub fn remove_voice_communication<R>(
    repo: &R,
    recordings: &RecordingStore,
    voice_id: i32,
) -> ServiceResult<VoiceCommunicationRemoval>
where
    R: VoiceCommunicationWriter + ?Sized,
{
    let communication = repo.delete_voice_communication(voice_id)?;

    let recording_error = match recordings.remove(&communication.file_path) {
        Ok(()) => None,
        Err(err) => {
            log::warn!(
                "Voice communication {voice_id} deleted but recording `{}` was not removed: {err}",
                communication.file_path
            );
            Some(err.to_string())
        }
    };

    Ok(VoiceCommunicationRemoval {
        communication,
        recording_error,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::{
        MockChatCommunicationReader, MockChatCommunicationWriter, MockVoiceCommunicationReader,
        MockVoiceCommunicationWriter,
    };
    use crate::services::ServiceError;

    fn started() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .unwrap_or_default()
    }

    fn voice(file_path: String) -> VoiceCommunication {
        VoiceCommunication {
            id: 4,
            start: started(),
            file_path,
            user_id: 1,
            customer_id: 2,
        }
    }

    #[test]
    fn removing_voice_communication_unlinks_recording() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir(dir.path().join("2024")).expect("subdirectory created");
        let recording = dir.path().join("2024").join("call.ogg");
        std::fs::write(&recording, b"audio").expect("recording written");
        let recordings = RecordingStore::new(dir.path());

        let mut repo = MockVoiceCommunicationWriter::new();
        repo.expect_delete_voice_communication()
            .with(eq(4))
            .times(1)
            .returning(|_| Ok(voice("2024/call.ogg".to_string())));

        let removal =
            remove_voice_communication(&repo, &recordings, 4).expect("record deleted");

        assert!(removal.recording_error.is_none());
        assert_eq!(removal.communication.file_path, "2024/call.ogg");
        assert!(!recording.exists());
    }

    #[test]
    fn failed_unlink_is_reported_without_failing_the_delete() {
        let dir = tempfile::tempdir().expect("temp dir");
        let recordings = RecordingStore::new(dir.path());

        let mut repo = MockVoiceCommunicationWriter::new();
        repo.expect_delete_voice_communication()
            .times(1)
            .returning(|_| Ok(voice("gone.ogg".to_string())));

        let removal =
            remove_voice_communication(&repo, &recordings, 4).expect("record deleted");

        assert_eq!(removal.communication.id, 4);
        assert!(removal.recording_error.is_some());
    }

    #[test]
    fn recordings_outside_the_store_are_left_alone() {
        let store_dir = tempfile::tempdir().expect("store dir");
        let other_dir = tempfile::tempdir().expect("other dir");
        let outside = other_dir.path().join("keep.db");
        std::fs::write(&outside, b"data").expect("outside file written");
        let recordings = RecordingStore::new(store_dir.path());

        let absolute = outside.to_string_lossy().into_owned();
        let climbing = format!(
            "../{}/keep.db",
            other_dir
                .path()
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        );

        for stored in [absolute, climbing] {
            let mut repo = MockVoiceCommunicationWriter::new();
            repo.expect_delete_voice_communication()
                .times(1)
                .returning(move |_| Ok(voice(stored.clone())));

            let removal =
                remove_voice_communication(&repo, &recordings, 4).expect("record deleted");

            assert!(removal.recording_error.is_some());
            assert!(outside.exists());
        }
    }

    #[test]
    fn store_root_itself_is_not_a_recording() {
        let dir = tempfile::tempdir().expect("temp dir");
        let recordings = RecordingStore::new(dir.path());

        assert!(recordings.resolve(".").is_err());
        assert!(dir.path().exists());
    }

    #[test]
    fn missing_voice_communication_leaves_files_alone() {
        let dir = tempfile::tempdir().expect("temp dir");
        let recordings = RecordingStore::new(dir.path());

        let mut repo = MockVoiceCommunicationWriter::new();
        repo.expect_delete_voice_communication()
            .returning(|_| Err(RepositoryError::NotFound));

        assert_eq!(
            remove_voice_communication(&repo, &recordings, 4),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn recording_path_is_wrapped_for_transport() {
        let mut repo = MockVoiceCommunicationReader::new();
        repo.expect_get_voice_recording_path()
            .with(eq(4))
            .returning(|_| Ok("/rec/4.ogg".to_string()));

        assert_eq!(
            get_voice_recording_path(&repo, 4),
            Ok(VoiceRecordingPath {
                file_path: "/rec/4.ogg".to_string()
            })
        );
    }

    #[test]
    fn create_chat_communication_checks_participants() {
        let mut repo = MockChatCommunicationWriter::new();
        repo.expect_create_chat_communication()
            .withf(|new_chat| new_chat.user_id == 1 && new_chat.customer_id == 99)
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let form = AddChatCommunicationForm {
            message: "Hello".to_string(),
            is_user_sent: true,
            user_id: 1,
            customer_id: 99,
        };

        assert_eq!(
            create_chat_communication(&repo, form),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn chat_listing_passes_filters() {
        let mut repo = MockChatCommunicationReader::new();
        repo.expect_list_chat_communications()
            .withf(|cursor, filters| *cursor == Some(10) && filters.is_user_sent == Some(true))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let query = ChatCommunicationListQuery {
            cursor: Some(10),
            is_user_sent: Some(true),
            ..ChatCommunicationListQuery::default()
        };

        assert_eq!(list_chat_communications(&repo, query), Ok(Vec::new()));
    }
}
