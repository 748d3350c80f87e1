//! Admin handlers for users, orders, and catalogue maintenance.
//!
//! Every handler first checks the session user's `is_admin` flag: `401`
//! without a session, `403` for other users.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{
    Category, DEFAULT_MAX_USERS, Error, LicenseType, LicenseTypeId, LicenseTypePatch,
    NewLicenseType, NewProduct, OrderDetails, Product, ProductId, ProductPatch, User,
    validation_error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::products::parse_product_id;
use crate::inbound::http::session::{SessionContext, require_admin};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, parse_price};

const INVALID_LICENSE_TYPE_ID: &str = "Invalid license type ID";

fn parse_license_type_id(raw: &str) -> ApiResult<LicenseTypeId> {
    parse_id(raw, FieldName::new("id"), INVALID_LICENSE_TYPE_ID)
}

/// Distinguish an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn deleted_or(existed: bool, message: &str) -> ApiResult<HttpResponse> {
    if existed {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found(message))
    }
}

/// Body for `POST /api/v1/admin/products`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub short_description: String,
    pub price: f64,
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_new: bool,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = Error;

    fn try_from(value: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            price: parse_price(value.price, FieldName::new("price"))?,
            name: value.name,
            description: value.description,
            short_description: value.short_description,
            image_url: value.image_url,
            category: value.category,
            is_popular: value.is_popular,
            is_best_seller: value.is_best_seller,
            is_new: value.is_new,
        })
    }
}

/// Body for `PUT /api/v1/admin/products/{id}`; absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_popular: Option<bool>,
    pub is_best_seller: Option<bool>,
    pub is_new: Option<bool>,
}

impl TryFrom<UpdateProductRequest> for ProductPatch {
    type Error = Error;

    fn try_from(value: UpdateProductRequest) -> Result<Self, Self::Error> {
        let price = value
            .price
            .map(|price| parse_price(price, FieldName::new("price")))
            .transpose()?;
        Ok(Self {
            name: value.name,
            description: value.description,
            short_description: value.short_description,
            price,
            image_url: value.image_url,
            category: value.category,
            is_popular: value.is_popular,
            is_best_seller: value.is_best_seller,
            is_new: value.is_new,
        })
    }
}

/// Body for `POST /api/v1/admin/license-types`.
///
/// An omitted `maxUsers` means one seat; an explicit `null` means unlimited.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLicenseTypeRequest {
    pub product_id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<u32>)]
    pub max_users: Option<Option<u32>>,
}

impl TryFrom<CreateLicenseTypeRequest> for NewLicenseType {
    type Error = Error;

    fn try_from(value: CreateLicenseTypeRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            product_id: ProductId::new(value.product_id),
            price: parse_price(value.price, FieldName::new("price"))?,
            name: value.name,
            description: value.description,
            max_users: value.max_users.unwrap_or(Some(DEFAULT_MAX_USERS)),
        })
    }
}

/// Body for `PUT /api/v1/admin/license-types/{id}`.
///
/// `maxUsers: null` clears the seat limit; omitting it keeps the current one.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLicenseTypeRequest {
    pub product_id: Option<u32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<u32>)]
    pub max_users: Option<Option<u32>>,
}

impl TryFrom<UpdateLicenseTypeRequest> for LicenseTypePatch {
    type Error = Error;

    fn try_from(value: UpdateLicenseTypeRequest) -> Result<Self, Self::Error> {
        let price = value
            .price
            .map(|price| parse_price(price, FieldName::new("price")))
            .transpose()?;
        Ok(Self {
            product_id: value.product_id.map(ProductId::new),
            name: value.name,
            description: value.description,
            price,
            max_users: value.max_users,
        })
    }
}

/// Body for `POST /api/v1/admin/categories`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    responses(
        (status = 200, description = "All users, without passwords", body = [User]),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListUsers"
)]
#[get("/admin/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<User>>> {
    require_admin(&state, &session).await?;
    state.users.list_users().await.map(web::Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/orders",
    responses(
        (status = 200, description = "All orders with their items", body = [OrderDetails]),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListOrders"
)]
#[get("/admin/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<OrderDetails>>> {
    require_admin(&state, &session).await?;
    state.orders_query.all_orders().await.map(web::Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateProduct"
)]
#[post("/admin/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateProductRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let product = NewProduct::try_from(payload.into_inner())?;
    let created = state.catalogue_admin.create_product(product).await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/products/{id}",
    params(("id" = u32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown product", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateProduct"
)]
#[put("/admin/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateProductRequest>,
) -> ApiResult<web::Json<Product>> {
    require_admin(&state, &session).await?;
    let id = parse_product_id(path.as_str())?;
    let patch = ProductPatch::try_from(payload.into_inner())?;
    state
        .catalogue_admin
        .update_product(id, patch)
        .await
        .map(web::Json)
}

/// Remove a product. Its license types, orders, and licenses are kept.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/products/{id}",
    params(("id" = u32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Unknown product", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteProduct"
)]
#[delete("/admin/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let id = parse_product_id(path.as_str())?;
    let existed = state.catalogue_admin.delete_product(id).await?;
    deleted_or(existed, "Product not found")
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/license-types",
    request_body = CreateLicenseTypeRequest,
    responses(
        (status = 201, description = "License type created", body = LicenseType),
        (status = 400, description = "Invalid request or unknown product", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateLicenseType"
)]
#[post("/admin/license-types")]
pub async fn create_license_type(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateLicenseTypeRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let license_type = NewLicenseType::try_from(payload.into_inner())?;
    let created = state
        .catalogue_admin
        .create_license_type(license_type)
        .await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/license-types/{id}",
    params(("id" = u32, Path, description = "License type id")),
    request_body = UpdateLicenseTypeRequest,
    responses(
        (status = 200, description = "License type updated", body = LicenseType),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown license type", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateLicenseType"
)]
#[put("/admin/license-types/{id}")]
pub async fn update_license_type(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateLicenseTypeRequest>,
) -> ApiResult<web::Json<LicenseType>> {
    require_admin(&state, &session).await?;
    let id = parse_license_type_id(path.as_str())?;
    let patch = LicenseTypePatch::try_from(payload.into_inner())?;
    state
        .catalogue_admin
        .update_license_type(id, patch)
        .await
        .map(web::Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/license-types/{id}",
    params(("id" = u32, Path, description = "License type id")),
    responses(
        (status = 204, description = "License type deleted"),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Unknown license type", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteLicenseType"
)]
#[delete("/admin/license-types/{id}")]
pub async fn delete_license_type(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let id = parse_license_type_id(path.as_str())?;
    let existed = state.catalogue_admin.delete_license_type(id).await?;
    deleted_or(existed, "License type not found")
}

/// The admin-managed category set, independent of product categories.
#[utoipa::path(
    get,
    path = "/api/v1/admin/categories",
    responses(
        (status = 200, description = "Admin category set", body = [Category]),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 403, description = "Not an admin", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminListCategories"
)]
#[get("/admin/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Category>>> {
    require_admin(&state, &session).await?;
    state.catalogue_admin.categories().await.map(web::Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Blank name", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateCategory"
)]
#[post("/admin/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCategoryRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let category =
        Category::new(&payload.name).map_err(|err| validation_error("name", &err))?;
    let created = state.catalogue_admin.create_category(category).await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/categories/{name}",
    params(("name" = String, Path, description = "Exact category name")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Unknown category", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteCategory"
)]
#[delete("/admin/categories/{name}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, &session).await?;
    let existed = state.catalogue_admin.delete_category(path.as_str()).await?;
    deleted_or(existed, "Category not found")
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
