//! Shared application wiring for storefront integration tests.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{DateTime, TimeZone, Utc};
use mockable::{Clock, MockClock};
use serde_json::{Value, json};
use storefront::Trace;
use storefront::domain::{
    AccountService, CatalogueService, LicenseQueryService, OrderFulfilmentService,
};
use storefront::inbound::http::api_services;
use storefront::inbound::http::state::{HttpState, HttpStatePorts};
use storefront::outbound::persistence::MemoryStore;

pub fn purchase_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid purchase timestamp")
}

fn fixed_clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(purchase_time());
    Arc::new(clock)
}

/// Handler state over a freshly seeded store.
pub fn seeded_state() -> web::Data<HttpState> {
    let clock = fixed_clock();
    let store = Arc::new(MemoryStore::seeded(Arc::clone(&clock)).expect("seed data loads"));
    let catalogue = Arc::new(CatalogueService::new(Arc::clone(&store)));
    let accounts = Arc::new(AccountService::new(Arc::clone(&store)));
    let fulfilment = Arc::new(OrderFulfilmentService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        clock,
    ));
    web::Data::new(HttpState::new(HttpStatePorts {
        catalogue: catalogue.clone(),
        catalogue_admin: catalogue.clone(),
        cart: catalogue,
        login: accounts.clone(),
        registration: accounts.clone(),
        users: accounts,
        licenses: Arc::new(LicenseQueryService::new(Arc::clone(&store), Arc::clone(&store))),
        orders: fulfilment.clone(),
        orders_query: fulfilment,
    }))
}

/// Initialise the full API, wrapped in the trace middleware, over a seeded
/// store.
pub async fn init_app()
-> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new().app_data(seeded_state()).wrap(Trace).service(
            web::scope("/api/v1")
                .wrap(session)
                .configure(api_services),
        ),
    )
    .await
}

/// Log in and return the issued session cookie.
pub async fn login<S>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({ "username": username, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login as {username}");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Issue a request and decode the JSON body, if any.
pub async fn call_json<S>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    if body.is_empty() {
        (status, Value::Null)
    } else {
        (status, serde_json::from_slice(&body).expect("json body"))
    }
}
