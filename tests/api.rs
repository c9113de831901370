use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use support_desk::domain::communication::NewVoiceCommunication;
use support_desk::domain::customer::NewCustomer;
use support_desk::domain::user::NewUser;
use support_desk::repository::{CustomerWriter, UserWriter, VoiceCommunicationWriter};
use support_desk::routes;
use support_desk::services::communications::RecordingStore;

mod common;

macro_rules! app {
    ($repo:expr) => {
        app!($repo, "missing-recordings-dir")
    };
    ($repo:expr, $recordings:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo))
                .app_data(web::Data::new(RecordingStore::new($recordings)))
                .app_data(routes::json_config())
                .service(web::scope("/api/v1").configure(routes::configure)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_customer_lifecycle_over_http() {
    let test_db = common::TestDb::new("test_customer_lifecycle_over_http.db");
    let app = app!(test_db.repo());

    let req = test::TestRequest::post()
        .uri("/api/v1/customers")
        .set_json(json!({
            "email": "a@x.com",
            "name": "A",
            "surname": "B",
            "phoneNumber": "123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["phoneNumber"], "123");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/customers/{id}"))
        .set_json(json!({ "name": "A2" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "A2");
    assert_eq!(updated["surname"], "B");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/customers/{id}/extended"))
        .to_request();
    let extended: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(extended["products"], json!([]));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/customers/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/customers/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_invalid_payloads_are_bad_requests() {
    let test_db = common::TestDb::new("test_invalid_payloads_are_bad_requests.db");
    let app = app!(test_db.repo());

    let req = test::TestRequest::post()
        .uri("/api/v1/customers")
        .set_json(json!({
            "email": "not-an-email",
            "name": "A",
            "surname": "B",
            "phoneNumber": "1"
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/products")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/v1/products?minPriceCents=abc")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_product_in_offer_cannot_be_deleted() {
    let test_db = common::TestDb::new("test_product_in_offer_cannot_be_deleted.db");
    let app = app!(test_db.repo());

    let req = test::TestRequest::post()
        .uri("/api/v1/products")
        .set_json(json!({
            "name": "Router",
            "description": "Dual band",
            "priceCents": 12900,
            "type": "hardware"
        }))
        .to_request();
    let product: Value = test::call_and_read_body_json(&app, req).await;
    let product_id = product["id"].as_i64().unwrap();
    assert_eq!(product["type"], "hardware");

    let req = test::TestRequest::post()
        .uri("/api/v1/offers")
        .set_json(json!({
            "name": "Bundle",
            "description": "Router deal",
            "offerProducts": [
                { "productId": product_id, "quantity": 1, "newPriceCents": 9900 }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/products/{product_id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/offers?productIds%5B0%5D={product_id}"))
        .to_request();
    let offers: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(offers.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn test_voice_recordings_stay_inside_the_recordings_dir() {
    let test_db = common::TestDb::new("test_voice_recordings_stay_inside_the_recordings_dir.db");
    let repo = test_db.repo();
    let store_dir = tempfile::tempdir().unwrap();
    let other_dir = tempfile::tempdir().unwrap();
    let app = app!(repo.clone(), store_dir.path());

    let user = repo
        .create_user(&NewUser::new("Ann", "Operator", "ann@desk.test"))
        .unwrap();
    let customer = repo
        .create_customer(&NewCustomer::new("c@x.com", "C", "D", "1"))
        .unwrap();

    let outside = other_dir.path().join("keep.db");
    std::fs::write(&outside, b"data").unwrap();

    for file_path in [outside.to_string_lossy().into_owned(), "../keep.db".to_string()] {
        let req = test::TestRequest::post()
            .uri("/api/v1/voice-communications")
            .set_json(json!({
                "start": "2024-05-20T10:00:00",
                "filePath": file_path,
                "userId": user.id,
                "customerId": customer.id
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    // Rows written before paths were validated are still confined on delete.
    let legacy = repo
        .create_voice_communication(&NewVoiceCommunication::new(
            chrono::NaiveDateTime::default(),
            outside.to_string_lossy(),
            user.id,
            customer.id,
        ))
        .unwrap();
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/voice-communications/{}", legacy.id))
        .to_request();
    let removal: Value = test::call_and_read_body_json(&app, req).await;
    assert!(removal["recordingError"].is_string());
    assert!(outside.exists());

    std::fs::write(store_dir.path().join("call.wav"), b"RIFF").unwrap();
    let req = test::TestRequest::post()
        .uri("/api/v1/voice-communications")
        .set_json(json!({
            "start": "2024-05-20T11:00:00",
            "filePath": "call.wav",
            "userId": user.id,
            "customerId": customer.id
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/voice-communications/{}", created["id"]))
        .to_request();
    let removal: Value = test::call_and_read_body_json(&app, req).await;
    assert!(removal["recordingError"].is_null());
    assert!(!store_dir.path().join("call.wav").exists());
}
