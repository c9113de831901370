use actix_web::{HttpRequest, Responder, delete, get, patch, post, web};

use crate::forms::customers::{AddCustomerForm, EditCustomerForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, parse_query};
use crate::services::customers as customer_service;

#[get("/customers")]
pub async fn list_customers(req: HttpRequest, repo: web::Data<DieselRepository>) -> impl Responder {
    let result = parse_query(&req)
        .and_then(|query| customer_service::list_customers(repo.get_ref(), query));
    json_response("list customers", result)
}

#[get("/customers/extended")]
pub async fn list_customers_extended(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = parse_query(&req)
        .and_then(|query| customer_service::list_customers_extended(repo.get_ref(), query));
    json_response("list extended customers", result)
}

#[get("/customers/emails")]
/// E-mail addresses of customers owning any of `productIds[..]`.
pub async fn list_customer_emails(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = parse_query(&req)
        .and_then(|query| customer_service::list_customer_emails(repo.get_ref(), query));
    json_response("list customer e-mails", result)
}

#[get("/customers/{customer_id:\\d+}")]
pub async fn show_customer(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let result = customer_service::get_customer(repo.get_ref(), path.into_inner());
    json_response("load customer", result)
}

#[get("/customers/{customer_id:\\d+}/extended")]
pub async fn show_customer_extended(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = customer_service::get_customer_extended(repo.get_ref(), path.into_inner());
    json_response("load extended customer", result)
}

#[post("/customers")]
pub async fn add_customer(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCustomerForm>,
) -> impl Responder {
    let result = customer_service::create_customer(repo.get_ref(), form.into_inner());
    created_response("create customer", result)
}

#[patch("/customers/{customer_id:\\d+}")]
pub async fn edit_customer(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditCustomerForm>,
) -> impl Responder {
    let result =
        customer_service::update_customer(repo.get_ref(), path.into_inner(), form.into_inner());
    json_response("update customer", result)
}

#[delete("/customers/{customer_id:\\d+}")]
pub async fn delete_customer(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = customer_service::delete_customer(repo.get_ref(), path.into_inner());
    json_response("delete customer", result)
}
