use actix_web::{HttpRequest, Responder, delete, get, patch, post, web};

use crate::forms::offers::{AddOfferForm, EditOfferForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, parse_query};
use crate::services::offers as offer_service;

#[get("/offers")]
pub async fn list_offers(req: HttpRequest, repo: web::Data<DieselRepository>) -> impl Responder {
    let result =
        parse_query(&req).and_then(|query| offer_service::list_offers(repo.get_ref(), query));
    json_response("list offers", result)
}

#[get("/offers/{offer_id:\\d+}")]
pub async fn show_offer(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let result = offer_service::get_offer(repo.get_ref(), path.into_inner());
    json_response("load offer", result)
}

#[get("/offers/{offer_id:\\d+}/extended")]
pub async fn show_offer_extended(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = offer_service::get_offer_extended(repo.get_ref(), path.into_inner());
    json_response("load extended offer", result)
}

#[post("/offers")]
pub async fn add_offer(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddOfferForm>,
) -> impl Responder {
    let result = offer_service::create_offer(repo.get_ref(), form.into_inner());
    created_response("create offer", result)
}

#[patch("/offers/{offer_id:\\d+}")]
pub async fn edit_offer(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditOfferForm>,
) -> impl Responder {
    let result = offer_service::update_offer(repo.get_ref(), path.into_inner(), form.into_inner());
    json_response("update offer", result)
}

#[delete("/offers/{offer_id:\\d+}")]
pub async fn delete_offer(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let result = offer_service::delete_offer(repo.get_ref(), path.into_inner());
    json_response("delete offer", result)
}
