//! Tests for the admin handlers.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{login_cookie, seeded_state, test_app};

async fn send<S>(
    app: &S,
    req: actix_test::TestRequest,
    cookie: Option<&Cookie<'static>>,
) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    };
    let res = actix_test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = actix_test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

#[rstest]
#[case::users("/api/v1/admin/users")]
#[case::orders("/api/v1/admin/orders")]
#[case::categories("/api/v1/admin/categories")]
#[actix_web::test]
async fn admin_reads_require_a_session(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(seeded_state())).await;
    let (status, _) = send(&app, actix_test::TestRequest::get().uri(uri), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case::users("/api/v1/admin/users")]
#[case::orders("/api/v1/admin/orders")]
#[case::categories("/api/v1/admin/categories")]
#[actix_web::test]
async fn admin_reads_forbid_regular_users(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(seeded_state())).await;
    let cookie = login_cookie(&app, "user", "user123").await;
    let (status, body) = send(&app, actix_test::TestRequest::get().uri(uri), Some(&cookie)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[actix_web::test]
async fn admin_lists_users_without_passwords() {
    let app = actix_test::init_service(test_app(seeded_state())).await;
    let cookie = login_cookie(&app, "admin", "admin123").await;
    let (status, body) = send(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/admin/users"),
        Some(&cookie),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().expect("users");
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|user| user.get("password").is_none()));
}

#[actix_web::test]
async fn product_lifecycle() {
    let app = actix_test::init_service(test_app(seeded_state())).await;
    let cookie = login_cookie(&app, "admin", "admin123").await;

    let (status, created) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/products")
            .set_json(json!({
                "name": "Log Shipper",
                "description": "Ships logs.",
                "shortDescription": "Logs",
                "price": 19.5,
                "imageUrl": "/img/logs.png",
                "category": "Observability"
            })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 4);
    assert_eq!(created["isNew"], false);

    let (status, updated) = send(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/admin/products/4")
            .set_json(json!({ "price": 24.0, "isNew": true })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 24.0);
    assert_eq!(updated["isNew"], true);
    assert_eq!(updated["name"], "Log Shipper");

    let (status, _) = send(
        &app,
        actix_test::TestRequest::delete().uri("/api/v1/admin/products/4"),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        actix_test::TestRequest::delete().uri("/api/v1/admin/products/4"),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[rstest]
#[case::product("/api/v1/admin/products/abc", "Invalid product ID")]
#[case::license_type("/api/v1/admin/license-types/abc", "Invalid license type ID")]
#[actix_web::test]
async fn malformed_ids_are_rejected(#[case] uri: &str, #[case] message: &str) {
    let app = actix_test::init_service(test_app(seeded_state())).await;
    let cookie = login_cookie(&app, "admin", "admin123").await;
    let (status, body) =
        send(&app, actix_test::TestRequest::delete().uri(uri), Some(&cookie)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], message);
}

#[actix_web::test]
async fn update_unknown_product_is_not_found() {
    let app = actix_test::init_service(test_app(seeded_state())).await;
    let cookie = login_cookie(&app, "admin", "admin123").await;
    let (status, body) = send(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/admin/products/999")
            .set_json(json!({ "name": "Ghost" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[rstest]
#[case::omitted(json!({"productId": 2, "name": "Solo", "price": 9.0}), json!(1))]
#[case::explicit(
    json!({"productId": 2, "name": "Site", "price": 999.0, "maxUsers": 50}),
    json!(50)
)]
#[case::unlimited(
    json!({"productId": 2, "name": "Enterprise", "price": 1999.0, "maxUsers": null}),
    Value::Null
)]
#[actix_web::test]
async fn license_type_seat_limits(#[case] payload: Value, #[case] max_users: Value) {
    let app = actix_test::init_service(test_app(seeded_state())).await;
    let cookie = login_cookie(&app, "admin", "admin123").await;
    let (status, created) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/license-types")
            .set_json(payload),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 7);
    assert_eq!(created["productId"], 2);
    assert_eq!(created["maxUsers"], max_users);
}

#[actix_web::test]
async fn license_type_for_unknown_product_is_rejected() {
    let app = actix_test::init_service(test_app(seeded_state())).await;
    let cookie = login_cookie(&app, "admin", "admin123").await;
    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/license-types")
            .set_json(json!({ "productId": 999, "name": "Solo", "price": 9.0 })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "productId");
}

#[actix_web::test]
async fn license_type_update_and_delete() {
    let app = actix_test::init_service(test_app(seeded_state())).await;
    let cookie = login_cookie(&app, "admin", "admin123").await;

    let (status, updated) = send(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/admin/license-types/2")
            .set_json(json!({ "maxUsers": null })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["maxUsers"], Value::Null);
    assert_eq!(updated["name"], "Team License");

    let (status, _) = send(
        &app,
        actix_test::TestRequest::delete().uri("/api/v1/admin/license-types/2"),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        actix_test::TestRequest::delete().uri("/api/v1/admin/license-types/2"),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "License type not found");
}

#[actix_web::test]
async fn admin_categories_are_independent_of_products() {
    let app = actix_test::init_service(test_app(seeded_state())).await;
    let cookie = login_cookie(&app, "admin", "admin123").await;

    let (status, created) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/categories")
            .set_json(json!({ "name": "Observability" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, json!("Observability"));

    let (_, derived) = send(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/categories"),
        None,
    )
    .await;
    assert!(
        derived
            .as_array()
            .expect("categories")
            .iter()
            .all(|category| category != "Observability")
    );

    let (status, _) = send(
        &app,
        actix_test::TestRequest::delete().uri("/api/v1/admin/categories/Development%20Tools"),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, products) = send(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/products/category/Development%20Tools"),
        None,
    )
    .await;
    assert_eq!(products.as_array().expect("products").len(), 1);

    let (status, body) = send(
        &app,
        actix_test::TestRequest::delete().uri("/api/v1/admin/categories/Development%20Tools"),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");
}

#[actix_web::test]
async fn blank_category_name_is_invalid() {
    let app = actix_test::init_service(test_app(seeded_state())).await;
    let cookie = login_cookie(&app, "admin", "admin123").await;
    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/categories")
            .set_json(json!({ "name": "  " })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "name");
}

#[actix_web::test]
async fn admin_sees_every_order() {
    let app = actix_test::init_service(test_app(seeded_state())).await;
    let (status, _) = send(
        &app,
        actix_test::TestRequest::post().uri("/api/v1/orders").set_json(json!({
            "order": { "userId": 2, "total": 79.99 },
            "items": [{ "productId": 2, "licenseTypeId": 3 }]
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let cookie = login_cookie(&app, "admin", "admin123").await;
    let (status, orders) = send(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/admin/orders"),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let orders = orders.as_array().expect("orders");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["userId"], 2);
    assert_eq!(orders[0]["items"][0]["product"]["name"], "SQL Database Manager");
}
