//! Account and per-user handlers.
//!
//! ```text
//! POST /api/v1/users/register {"username":"ada","email":"ada@example.com","password":"pw"}
//! POST /api/v1/users/login {"username":"user","password":"user123"}
//! POST /api/v1/users/logout
//! GET /api/v1/users/me
//! GET /api/v1/users/2/licenses
//! GET /api/v1/users/2/licenses/active
//! GET /api/v1/users/2/orders
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    LicenseDetails, LoginCredentials, LoginValidationError, NewUser, OrderDetails, User,
    UserId, UserValidationError, validation_error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{SessionContext, require_user};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const INVALID_USER_ID: &str = "Invalid user ID";

fn parse_user_id(raw: &str) -> ApiResult<UserId> {
    parse_id(raw, FieldName::new("id"), INVALID_USER_ID)
}

/// Registration body for `POST /api/v1/users/register`.
///
/// Any `isAdmin` field sent by the client is ignored.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl TryFrom<RegisterRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let mut user = Self::try_new(&value.username, &value.email, &value.password)?;
        user.first_name = value.first_name;
        user.last_name = value.last_name;
        user.company = value.company;
        Ok(user)
    }
}

/// Login body for `POST /api/v1/users/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Create an account. The password is never echoed back.
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email or username already in use", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = NewUser::try_from(payload.into_inner())
        .map_err(|err| validation_error(err.field(), &err))?;
    let user = state.registration.register(new_user).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|err| validation_error(err.field(), &err))?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(user.id)?;
    Ok(web::Json(user))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/users/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// The user bound to the current session.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "No session", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    require_user(&state, &session).await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/licenses",
    params(("id" = u32, Path, description = "User id")),
    responses(
        (
            status = 200,
            description = "Licenses with product and license type",
            body = [LicenseDetails]
        ),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "userLicenses",
    security([])
)]
#[get("/users/{id}/licenses")]
pub async fn user_licenses(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<LicenseDetails>>> {
    let id = parse_user_id(path.as_str())?;
    state.licenses.licenses_for_user(id).await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/licenses/active",
    params(("id" = u32, Path, description = "User id")),
    responses(
        (status = 200, description = "Active licenses", body = [LicenseDetails]),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "userActiveLicenses",
    security([])
)]
#[get("/users/{id}/licenses/active")]
pub async fn user_active_licenses(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<LicenseDetails>>> {
    let id = parse_user_id(path.as_str())?;
    state.licenses.active_licenses_for_user(id).await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/orders",
    params(("id" = u32, Path, description = "User id")),
    responses(
        (status = 200, description = "Orders with their items", body = [OrderDetails]),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "userOrders",
    security([])
)]
#[get("/users/{id}/orders")]
pub async fn user_orders(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<OrderDetails>>> {
    let id = parse_user_id(path.as_str())?;
    state.orders_query.orders_for_user(id).await.map(web::Json)
}
