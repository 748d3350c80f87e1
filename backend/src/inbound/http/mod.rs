//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod error;
pub mod health;
pub mod licenses;
pub mod orders;
pub mod products;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

use validation::invalid_body_error;

/// JSON extractor settings: undecodable bodies become `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| invalid_body_error(&err.to_string()).into())
}

/// Register every API handler. Mount inside the `/api/v1` scope, behind the
/// session middleware.
///
/// Literal segments are registered before the `{id}` routes they would
/// otherwise shadow.
pub fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(products::list_products)
        .service(products::featured_products)
        .service(products::products_by_category)
        .service(products::get_product)
        .service(products::product_license_types)
        .service(products::product_categories)
        .service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(users::user_licenses)
        .service(users::user_active_licenses)
        .service(users::user_orders)
        .service(licenses::get_license)
        .service(licenses::download_license)
        .service(orders::place_order)
        .service(orders::quote_cart)
        .service(admin::list_users)
        .service(admin::list_orders)
        .service(admin::create_product)
        .service(admin::update_product)
        .service(admin::delete_product)
        .service(admin::create_license_type)
        .service(admin::update_license_type)
        .service(admin::delete_license_type)
        .service(admin::list_categories)
        .service(admin::create_category)
        .service(admin::delete_category);
}
