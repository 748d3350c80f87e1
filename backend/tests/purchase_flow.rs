//! End-to-end purchase flows over the seeded store.

#[path = "support/app.rs"]
mod app_support;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use app_support::{call_json, init_app};
use regex::Regex;
use rstest::rstest;
use serde_json::json;

#[actix_web::test]
async fn seeded_user_buys_a_single_license() {
    let app = init_app().await;

    let (status, placed) = call_json(
        &app,
        TestRequest::post()
            .uri("/api/v1/orders")
            .set_json(json!({
                "order": { "userId": 2, "total": 95.39 },
                "items": [{ "productId": 1, "licenseTypeId": 1, "quantity": 1 }]
            }))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(placed["order"]["id"], 1);
    assert_eq!(placed["order"]["userId"], 2);
    assert_eq!(placed["order"]["status"], "pending");
    assert_eq!(placed["orderItems"][0]["price"], 89.99);
    let key = placed["licenses"][0]["licenseKey"]
        .as_str()
        .expect("license key")
        .to_owned();
    let key_shape =
        Regex::new(r"^DEVE-XXXX-[0-9A-F]{8}-[0-9A-F]{8}-[0-9A-F]{8}$").expect("regex");
    assert!(key_shape.is_match(&key), "unexpected key {key}");
    assert_eq!(placed["licenses"][0]["expiresAt"], "2027-03-02T09:00:00Z");

    let (status, history) = call_json(
        &app,
        TestRequest::get().uri("/api/v1/users/2/orders").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().expect("orders").len(), 1);
    assert_eq!(history[0]["items"][0]["product"]["name"], "Developer Suite Pro");

    let (status, active) = call_json(
        &app,
        TestRequest::get()
            .uri("/api/v1/users/2/licenses/active")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active[0]["licenseKey"], key.as_str());

    let (status, found) = call_json(
        &app,
        TestRequest::get()
            .uri(&format!("/api/v1/licenses/{key}"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["licenseType"]["name"], "Single User");
}

#[actix_web::test]
async fn rejected_order_writes_nothing() {
    let app = init_app().await;

    let (status, body) = call_json(
        &app,
        TestRequest::post()
            .uri("/api/v1/orders")
            .set_json(json!({
                "order": { "userId": 2, "total": 200.0 },
                "items": [
                    { "productId": 1, "licenseTypeId": 1 },
                    { "productId": 999, "licenseTypeId": 1 }
                ]
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["productId"], 999);

    for uri in ["/api/v1/users/2/orders", "/api/v1/users/2/licenses"] {
        let (status, body) = call_json(&app, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]), "{uri} should be empty");
    }

    let (status, placed) = call_json(
        &app,
        TestRequest::post()
            .uri("/api/v1/orders")
            .set_json(json!({
                "order": { "userId": 2, "total": 95.39 },
                "items": [{ "productId": 1, "licenseTypeId": 1 }]
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(placed["order"]["id"], 1, "failed placement consumed no id");
}

#[rstest]
#[case(1, 2, "TEAM5")]
#[case(2, 3, "XXXX")]
#[case(3, 6, "TEAM5")]
#[actix_web::test]
async fn seat_segment_follows_the_license_type(
    #[case] product_id: u32,
    #[case] license_type_id: u32,
    #[case] segment: &str,
) {
    let app = init_app().await;

    let (status, placed) = call_json(
        &app,
        TestRequest::post()
            .uri("/api/v1/orders")
            .set_json(json!({
                "order": { "userId": 2, "total": 300.0 },
                "items": [{ "productId": product_id, "licenseTypeId": license_type_id }]
            }))
            .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let key = placed["licenses"][0]["licenseKey"].as_str().expect("key");
    let second = key.split('-').nth(1).expect("second segment");
    assert_eq!(second, segment, "unexpected key {key}");
}

#[actix_web::test]
async fn error_responses_carry_the_trace_id() {
    let app = init_app().await;
    let res = actix_web::test::call_service(
        &app,
        TestRequest::get().uri("/api/v1/products/999").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let header = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .expect("trace-id header")
        .to_owned();
    let body: serde_json::Value =
        serde_json::from_slice(&actix_web::test::read_body(res).await).expect("json");
    assert_eq!(body["traceId"], header.as_str());
}
