//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every storefront endpoint, the error schema wrappers
//! from [`crate::inbound::http::schemas`], and the session cookie security
//! scheme. Swagger UI serves it in debug builds and `openapi-dump` prints it
//! for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/users/login.",
            ))),
        );
    }
}

/// OpenAPI document for the storefront REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Storefront API",
        description = "Catalogue browsing, checkout, license retrieval, and catalogue administration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::featured_products,
        crate::inbound::http::products::products_by_category,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::product_license_types,
        crate::inbound::http::products::product_categories,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::user_licenses,
        crate::inbound::http::users::user_active_licenses,
        crate::inbound::http::users::user_orders,
        crate::inbound::http::licenses::get_license,
        crate::inbound::http::licenses::download_license,
        crate::inbound::http::orders::place_order,
        crate::inbound::http::orders::quote_cart,
        crate::inbound::http::admin::list_users,
        crate::inbound::http::admin::list_orders,
        crate::inbound::http::admin::create_product,
        crate::inbound::http::admin::update_product,
        crate::inbound::http::admin::delete_product,
        crate::inbound::http::admin::create_license_type,
        crate::inbound::http::admin::update_license_type,
        crate::inbound::http::admin::delete_license_type,
        crate::inbound::http::admin::list_categories,
        crate::inbound::http::admin::create_category,
        crate::inbound::http::admin::delete_category,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "products", description = "Catalogue browsing"),
        (name = "users", description = "Accounts, sessions, and purchase history"),
        (name = "licenses", description = "License lookup and download"),
        (name = "orders", description = "Checkout"),
        (name = "admin", description = "Administration, admin flag required"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
