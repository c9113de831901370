use actix_web::{HttpRequest, Responder, delete, get, patch, post, web};

use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, parse_query};
use crate::services::categories as category_service;

#[get("/categories")]
pub async fn list_categories(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = parse_query(&req)
        .and_then(|query| category_service::list_categories(repo.get_ref(), query));
    json_response("list categories", result)
}

#[get("/categories/{category_id:\\d+}")]
pub async fn show_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = category_service::get_category(repo.get_ref(), path.into_inner());
    json_response("load category", result)
}

#[get("/categories/{category_id:\\d+}/extended")]
pub async fn show_category_extended(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = category_service::get_category_extended(repo.get_ref(), path.into_inner());
    json_response("load extended category", result)
}

#[post("/categories")]
pub async fn add_category(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCategoryForm>,
) -> impl Responder {
    let result = category_service::create_category(repo.get_ref(), form.into_inner());
    created_response("create category", result)
}

#[patch("/categories/{category_id:\\d+}")]
pub async fn edit_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditCategoryForm>,
) -> impl Responder {
    let result =
        category_service::update_category(repo.get_ref(), path.into_inner(), form.into_inner());
    json_response("update category", result)
}

#[delete("/categories/{category_id:\\d+}")]
pub async fn delete_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = category_service::delete_category(repo.get_ref(), path.into_inner());
    json_response("delete category", result)
}
