use actix_web::{HttpRequest, HttpResponse, error, web};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::services::{ServiceError, ServiceResult};

pub mod categories;
pub mod communications;
pub mod customers;
pub mod offers;
pub mod products;
pub mod users;

/// Nesting depth accepted for bracketed query parameters such as `ids[0]=1`.
const QUERY_MAX_DEPTH: usize = 5;

/// Register every JSON endpoint on the given scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::list_users)
        .service(users::show_user)
        .service(users::add_user)
        .service(customers::list_customers)
        .service(customers::list_customers_extended)
        .service(customers::list_customer_emails)
        .service(customers::show_customer)
        .service(customers::show_customer_extended)
        .service(customers::add_customer)
        .service(customers::edit_customer)
        .service(customers::delete_customer)
        .service(products::list_products)
        .service(products::list_products_extended)
        .service(products::show_product)
        .service(products::show_product_extended)
        .service(products::add_product)
        .service(products::edit_product)
        .service(products::delete_product)
        .service(categories::list_categories)
        .service(categories::show_category)
        .service(categories::show_category_extended)
        .service(categories::add_category)
        .service(categories::edit_category)
        .service(categories::delete_category)
        .service(offers::list_offers)
        .service(offers::show_offer)
        .service(offers::show_offer_extended)
        .service(offers::add_offer)
        .service(offers::edit_offer)
        .service(offers::delete_offer)
        .service(communications::list_chat_communications)
        .service(communications::list_chat_communications_extended)
        .service(communications::show_chat_communication)
        .service(communications::show_chat_communication_extended)
        .service(communications::add_chat_communication)
        .service(communications::edit_chat_communication)
        .service(communications::delete_chat_communication)
        .service(communications::list_voice_communications)
        .service(communications::list_voice_communications_extended)
        .service(communications::show_voice_communication)
        .service(communications::show_voice_communication_extended)
        .service(communications::show_voice_recording_path)
        .service(communications::add_voice_communication)
        .service(communications::edit_voice_communication)
        .service(communications::delete_voice_communication);
}

/// JSON extractor settings that answer malformed bodies with a JSON 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        error::InternalError::from_response(err, response).into()
    })
}

/// Decode the request query string, including bracketed list parameters.
pub fn parse_query<T: DeserializeOwned>(req: &HttpRequest) -> ServiceResult<T> {
    serde_qs::Config::new(QUERY_MAX_DEPTH, false)
        .deserialize_str(req.query_string())
        .map_err(|err| ServiceError::Form(err.to_string()))
}

/// Answer `200 OK` with the value, or the matching error response.
pub fn json_response<T: Serialize>(action: &str, result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(err) => error_response(action, err),
    }
}

/// Answer `201 Created` with the value, or the matching error response.
pub fn created_response<T: Serialize>(action: &str, result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Created().json(value),
        Err(err) => error_response(action, err),
    }
}

pub fn error_response(action: &str, err: ServiceError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        ServiceError::Form(_) => HttpResponse::BadRequest().json(body),
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(body),
        ServiceError::Internal(_) => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().json(json!({ "error": "internal server error" }))
        }
    }
}
