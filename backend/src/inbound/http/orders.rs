//! Checkout handlers: order placement and cart pricing.
//!
//! ```text
//! POST /api/v1/orders
//! {"order":{"userId":2,"total":94.79},"items":[{"productId":1,"licenseTypeId":1}]}
//! POST /api/v1/cart/quote {"items":[{"productId":1,"licenseTypeId":2,"quantity":2}]}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CartQuote, Error, LicenseTypeId, LineSelection, OrderPlacement, OrderStatus, PlacedOrder,
    ProductId, UserId, validation_error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_price};

fn default_quantity() -> u32 {
    1
}

/// One purchased line; `quantity` defaults to 1.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product_id: u32,
    pub license_type_id: u32,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl From<&OrderLineRequest> for LineSelection {
    fn from(line: &OrderLineRequest) -> Self {
        Self {
            product_id: ProductId::new(line.product_id),
            license_type_id: LicenseTypeId::new(line.license_type_id),
            quantity: line.quantity,
        }
    }
}

/// Order header. `status` defaults to `pending`; `total` is recorded as sent.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderHeaderRequest {
    pub user_id: u32,
    pub total: f64,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body for `POST /api/v1/orders`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub order: OrderHeaderRequest,
    pub items: Vec<OrderLineRequest>,
}

impl TryFrom<PlaceOrderRequest> for OrderPlacement {
    type Error = Error;

    fn try_from(value: PlaceOrderRequest) -> Result<Self, Self::Error> {
        let PlaceOrderRequest { order, items } = value;
        let total = parse_price(order.total, FieldName::new("order.total"))?;
        let status = match order.status {
            Some(raw) => OrderStatus::new(raw).map_err(|err| validation_error(err.field(), &err))?,
            None => OrderStatus::default(),
        };
        let lines = items.iter().map(LineSelection::from).collect();
        Self::try_new(UserId::new(order.user_id), total, status, lines)
            .map_err(|err| validation_error(err.field(), &err))
    }
}

/// Body for `POST /api/v1/cart/quote`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartQuoteRequest {
    pub items: Vec<OrderLineRequest>,
}

/// Record an order and issue one license per line.
///
/// Every line must reference an existing product and license type; otherwise
/// nothing is written and the response names the offending ids.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order recorded and licenses issued", body = PlacedOrder),
        (
            status = 400,
            description = "Invalid body or unknown product/license type",
            body = ErrorSchema
        )
    ),
    tags = ["orders"],
    operation_id = "placeOrder",
    security([])
)]
#[post("/orders")]
pub async fn place_order(
    state: web::Data<HttpState>,
    payload: web::Json<PlaceOrderRequest>,
) -> ApiResult<HttpResponse> {
    let placement = OrderPlacement::try_from(payload.into_inner())?;
    let placed = state.orders.place_order(placement).await?;
    Ok(HttpResponse::Created().json(placed))
}

/// Price a cart: line totals, subtotal, tax, and total.
#[utoipa::path(
    post,
    path = "/api/v1/cart/quote",
    request_body = CartQuoteRequest,
    responses(
        (status = 200, description = "Priced cart", body = CartQuote),
        (
            status = 400,
            description = "Unknown product/license type or zero quantity",
            body = ErrorSchema
        )
    ),
    tags = ["orders"],
    operation_id = "quoteCart",
    security([])
)]
#[post("/cart/quote")]
pub async fn quote_cart(
    state: web::Data<HttpState>,
    payload: web::Json<CartQuoteRequest>,
) -> ApiResult<web::Json<CartQuote>> {
    let lines = payload.items.iter().map(LineSelection::from).collect();
    state.cart.quote(lines).await.map(web::Json)
}
