use actix_web::{HttpRequest, Responder, delete, get, patch, post, web};

use crate::forms::communications::{
    AddChatCommunicationForm, AddVoiceCommunicationForm, EditChatCommunicationForm,
    EditVoiceCommunicationForm,
};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, parse_query};
use crate::services::communications::{self as communication_service, RecordingStore};

#[get("/chat-communications")]
pub async fn list_chat_communications(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = parse_query(&req).and_then(|query| {
        communication_service::list_chat_communications(repo.get_ref(), query)
    });
    json_response("list chat communications", result)
}

#[get("/chat-communications/extended")]
pub async fn list_chat_communications_extended(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = parse_query(&req).and_then(|query| {
        communication_service::list_chat_communications_extended(repo.get_ref(), query)
    });
    json_response("list extended chat communications", result)
}

#[get("/chat-communications/{chat_id:\\d+}")]
pub async fn show_chat_communication(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = communication_service::get_chat_communication(repo.get_ref(), path.into_inner());
    json_response("load chat communication", result)
}

#[get("/chat-communications/{chat_id:\\d+}/extended")]
pub async fn show_chat_communication_extended(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result =
        communication_service::get_chat_communication_extended(repo.get_ref(), path.into_inner());
    json_response("load extended chat communication", result)
}

#[post("/chat-communications")]
pub async fn add_chat_communication(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddChatCommunicationForm>,
) -> impl Responder {
    let result =
        communication_service::create_chat_communication(repo.get_ref(), form.into_inner());
    created_response("create chat communication", result)
}

#[patch("/chat-communications/{chat_id:\\d+}")]
pub async fn edit_chat_communication(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditChatCommunicationForm>,
) -> impl Responder {
    let result = communication_service::update_chat_communication(
        repo.get_ref(),
        path.into_inner(),
        form.into_inner(),
    );
    json_response("update chat communication", result)
}

#[delete("/chat-communications/{chat_id:\\d+}")]
pub async fn delete_chat_communication(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result =
        communication_service::delete_chat_communication(repo.get_ref(), path.into_inner());
    json_response("delete chat communication", result)
}

#[get("/voice-communications")]
pub async fn list_voice_communications(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = parse_query(&req).and_then(|query| {
        communication_service::list_voice_communications(repo.get_ref(), query)
    });
    json_response("list voice communications", result)
}

#[get("/voice-communications/extended")]
pub async fn list_voice_communications_extended(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = parse_query(&req).and_then(|query| {
        communication_service::list_voice_communications_extended(repo.get_ref(), query)
    });
    json_response("list extended voice communications", result)
}

#[get("/voice-communications/{voice_id:\\d+}")]
pub async fn show_voice_communication(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = communication_service::get_voice_communication(repo.get_ref(), path.into_inner());
    json_response("load voice communication", result)
}

#[get("/voice-communications/{voice_id:\\d+}/extended")]
pub async fn show_voice_communication_extended(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result =
        communication_service::get_voice_communication_extended(repo.get_ref(), path.into_inner());
    json_response("load extended voice communication", result)
}

#[get("/voice-communications/{voice_id:\\d+}/recording-path")]
pub async fn show_voice_recording_path(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = communication_service::get_voice_recording_path(repo.get_ref(), path.into_inner());
    json_response("load voice recording path", result)
}

#[post("/voice-communications")]
pub async fn add_voice_communication(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddVoiceCommunicationForm>,
) -> impl Responder {
    let result =
        communication_service::create_voice_communication(repo.get_ref(), form.into_inner());
    created_response("create voice communication", result)
}

#[patch("/voice-communications/{voice_id:\\d+}")]
pub async fn edit_voice_communication(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditVoiceCommunicationForm>,
) -> impl Responder {
    let result = communication_service::update_voice_communication(
        repo.get_ref(),
        path.into_inner(),
        form.into_inner(),
    );
    json_response("update voice communication", result)
}

/// Deletes the record, then its recording; an unlink failure is reported in `recordingError`.
#[delete("/voice-communications/{voice_id:\\d+}")]
pub async fn delete_voice_communication(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    recordings: web::Data<RecordingStore>,
) -> impl Responder {
    let result = communication_service::remove_voice_communication(
        repo.get_ref(),
        recordings.get_ref(),
        path.into_inner(),
    );
    json_response("delete voice communication", result)
}
