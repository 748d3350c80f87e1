//! Catalogue read handlers.
//!
//! ```text
//! GET /api/v1/products
//! GET /api/v1/products/featured
//! GET /api/v1/products/category/Database%20Software
//! GET /api/v1/products/1
//! GET /api/v1/products/1/license-types
//! GET /api/v1/categories
//! ```

use actix_web::{get, web};

use crate::domain::{Category, LicenseType, Product, ProductId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

pub(crate) const INVALID_PRODUCT_ID: &str = "Invalid product ID";

pub(crate) fn parse_product_id(raw: &str) -> ApiResult<ProductId> {
    parse_id(raw, FieldName::new("id"), INVALID_PRODUCT_ID)
}

/// List every product in the catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "All products", body = [Product]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "listProducts",
    security([])
)]
#[get("/products")]
pub async fn list_products(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Product>>> {
    state.catalogue.products().await.map(web::Json)
}

/// Products flagged popular, best seller, or new.
#[utoipa::path(
    get,
    path = "/api/v1/products/featured",
    responses(
        (status = 200, description = "Featured products", body = [Product])
    ),
    tags = ["products"],
    operation_id = "featuredProducts",
    security([])
)]
#[get("/products/featured")]
pub async fn featured_products(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Product>>> {
    state.catalogue.featured_products().await.map(web::Json)
}

/// Products whose category matches the path segment exactly.
#[utoipa::path(
    get,
    path = "/api/v1/products/category/{category}",
    params(("category" = String, Path, description = "Exact, case-sensitive category name")),
    responses(
        (status = 200, description = "Products in the category", body = [Product])
    ),
    tags = ["products"],
    operation_id = "productsByCategory",
    security([])
)]
#[get("/products/category/{category}")]
pub async fn products_by_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Product>>> {
    state
        .catalogue
        .products_in_category(path.as_str())
        .await
        .map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = u32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Unknown product", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "getProduct",
    security([])
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Product>> {
    let id = parse_product_id(path.as_str())?;
    state.catalogue.product(id).await.map(web::Json)
}

/// License types offered for a product; empty for unknown products.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/license-types",
    params(("id" = u32, Path, description = "Product id")),
    responses(
        (status = 200, description = "License types of the product", body = [LicenseType]),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "productLicenseTypes",
    security([])
)]
#[get("/products/{id}/license-types")]
pub async fn product_license_types(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<LicenseType>>> {
    let id = parse_product_id(path.as_str())?;
    state.catalogue.license_types(id).await.map(web::Json)
}

/// Distinct categories of the stored products.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Categories in use", body = [Category])
    ),
    tags = ["products"],
    operation_id = "productCategories",
    security([])
)]
#[get("/categories")]
pub async fn product_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Category>>> {
    state.catalogue.product_categories().await.map(web::Json)
}
