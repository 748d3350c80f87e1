//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{DateTime, TimeZone, Utc};
use mockable::{Clock, MockClock};
use serde_json::json;

use crate::domain::{AccountService, CatalogueService, LicenseQueryService, OrderFulfilmentService};
use crate::inbound::http::api_services;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::persistence::MemoryStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn fixed_clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(fixture_timestamp());
    Arc::new(clock)
}

/// Handler state over a freshly seeded store.
pub(crate) fn seeded_state() -> web::Data<HttpState> {
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

/// Application with every API route mounted under `/api/v1`.
pub(crate) fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(api_services),
    )
}

/// Log in through the API and return the session cookie.
pub(crate) async fn login_cookie<S>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({ "username": username, "password": password }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
