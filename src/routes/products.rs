use actix_web::{HttpRequest, Responder, delete, get, patch, post, web};

use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, parse_query};
use crate::services::products as product_service;

#[get("/products")]
pub async fn list_products(req: HttpRequest, repo: web::Data<DieselRepository>) -> impl Responder {
    let result =
        parse_query(&req).and_then(|query| product_service::list_products(repo.get_ref(), query));
    json_response("list products", result)
}

#[get("/products/extended")]
pub async fn list_products_extended(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = parse_query(&req)
        .and_then(|query| product_service::list_products_extended(repo.get_ref(), query));
    json_response("list extended products", result)
}

#[get("/products/{product_id:\\d+}")]
pub async fn show_product(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let result = product_service::get_product(repo.get_ref(), path.into_inner());
    json_response("load product", result)
}

#[get("/products/{product_id:\\d+}/extended")]
pub async fn show_product_extended(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = product_service::get_product_extended(repo.get_ref(), path.into_inner());
    json_response("load extended product", result)
}

#[post("/products")]
pub async fn add_product(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    let result = product_service::create_product(repo.get_ref(), form.into_inner());
    created_response("create product", result)
}

#[patch("/products/{product_id:\\d+}")]
pub async fn edit_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    let result =
        product_service::update_product(repo.get_ref(), path.into_inner(), form.into_inner());
    json_response("update product", result)
}

#[delete("/products/{product_id:\\d+}")]
/// Responds with `409 Conflict` while an offer still lists the product.
pub async fn delete_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = product_service::delete_product(repo.get_ref(), path.into_inner());
    json_response("delete product", result)
}
