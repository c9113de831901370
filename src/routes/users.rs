use actix_web::{HttpRequest, Responder, get, post, web};

use crate::forms::users::AddUserForm;
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, parse_query};
use crate::services::users as user_service;

#[get("/users")]
pub async fn list_users(req: HttpRequest, repo: web::Data<DieselRepository>) -> impl Responder {
    let result = parse_query(&req).and_then(|query| user_service::list_users(repo.get_ref(), query));
    json_response("list users", result)
}

#[get("/users/{user_id:\\d+}")]
pub async fn show_user(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let result = user_service::get_user(repo.get_ref(), path.into_inner());
    json_response("load user", result)
}

#[post("/users")]
pub async fn add_user(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddUserForm>,
) -> impl Responder {
    let result = user_service::create_user(repo.get_ref(), form.into_inner());
    created_response("create user", result)
}
