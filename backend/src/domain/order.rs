//! Orders, order items, and the placement input/output of the fulfilment
//! workflow.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    LicenseDetails, LicenseType, LicenseTypeId, OrderId, OrderItemId, Price, Product, ProductId,
    UserId,
};

/// Status assigned when a placement does not name one.
pub const DEFAULT_ORDER_STATUS: &str = "pending";

/// Validation failures for order placement input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    EmptyStatus,
    NoLines,
    ZeroQuantity { line: usize },
}

impl OrderValidationError {
    pub fn field(&self) -> String {
        match self {
            Self::EmptyStatus => "order.status".to_owned(),
            Self::NoLines => "items".to_owned(),
            Self::ZeroQuantity { line } => format!("items[{line}].quantity"),
        }
    }
}

impl fmt::Display for OrderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStatus => write!(f, "order status must not be empty"),
            Self::NoLines => write!(f, "an order needs at least one item"),
            Self::ZeroQuantity { line } => {
                write!(f, "item {line} must have a quantity of at least 1")
            }
        }
    }
}

impl std::error::Error for OrderValidationError {}

/// Free-form order status. No transitions are defined beyond the initial
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderStatus(String);

impl OrderStatus {
    pub fn new(status: impl Into<String>) -> Result<Self, OrderValidationError> {
        let status = status.into();
        if status.trim().is_empty() {
            return Err(OrderValidationError::EmptyStatus);
        }
        Ok(Self(status))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self(DEFAULT_ORDER_STATUS.to_owned())
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = OrderValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        value.0
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A recorded purchase.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(value_type = u32)]
    pub id: OrderId,
    #[schema(value_type = u32)]
    pub user_id: UserId,
    #[schema(value_type = f64, example = 89.99)]
    pub total: Price,
    #[schema(value_type = String, example = "pending")]
    pub status: OrderStatus,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub total: Price,
    pub status: OrderStatus,
}

impl NewOrder {
    pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            user_id: self.user_id,
            total: self.total,
            status: self.status,
            created_at,
        }
    }
}

/// One purchased line. `price` is the license type's unit price at the
/// moment of purchase and is never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[schema(value_type = u32)]
    pub id: OrderItemId,
    #[schema(value_type = u32)]
    pub order_id: OrderId,
    #[schema(value_type = u32)]
    pub product_id: ProductId,
    #[schema(value_type = u32)]
    pub license_type_id: LicenseTypeId,
    #[schema(example = 1)]
    pub quantity: u32,
    #[schema(value_type = f64, example = 89.99)]
    pub price: Price,
}

/// Order item staged before its order id is known.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub license_type_id: LicenseTypeId,
    pub quantity: u32,
    pub price: Price,
}

impl NewOrderItem {
    pub fn into_order_item(self, id: OrderItemId, order_id: OrderId) -> OrderItem {
        OrderItem {
            id,
            order_id,
            product_id: self.product_id,
            license_type_id: self.license_type_id,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

/// A product and license type chosen for purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSelection {
    pub product_id: ProductId,
    pub license_type_id: LicenseTypeId,
    pub quantity: u32,
}

/// Validated input of the fulfilment workflow.
///
/// `total` is the amount the client charged; it is recorded as given.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlacement {
    pub user_id: UserId,
    pub total: Price,
    pub status: OrderStatus,
    lines: Vec<LineSelection>,
}

impl OrderPlacement {
    /// Validate line selections.
    ///
    /// At least one line is required and every quantity must be `>= 1`.
    pub fn try_new(
        user_id: UserId,
        total: Price,
        status: OrderStatus,
        lines: Vec<LineSelection>,
    ) -> Result<Self, OrderValidationError> {
        if lines.is_empty() {
            return Err(OrderValidationError::NoLines);
        }
        if let Some(line) = lines.iter().position(|line| line.quantity == 0) {
            return Err(OrderValidationError::ZeroQuantity { line });
        }
        Ok(Self {
            user_id,
            total,
            status,
            lines,
        })
    }

    pub fn lines(&self) -> &[LineSelection] {
        &self.lines
    }
}

/// Outcome of a successful placement.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order: Order,
    pub order_items: Vec<OrderItem>,
    pub licenses: Vec<LicenseDetails>,
}

/// An order item joined with its product and license type.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetails {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product: Option<Product>,
    pub license_type: Option<LicenseType>,
}

/// An order with its enriched items, as shown in order histories.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn line(quantity: u32) -> LineSelection {
        LineSelection {
            product_id: ProductId::new(1),
            license_type_id: LicenseTypeId::new(1),
            quantity,
        }
    }

    #[rstest]
    fn status_defaults_to_pending() {
        assert_eq!(OrderStatus::default().as_str(), "pending");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_status_is_rejected(#[case] raw: &str) {
        assert_eq!(OrderStatus::new(raw), Err(OrderValidationError::EmptyStatus));
    }

    #[rstest]
    fn placement_requires_lines() {
        let err = OrderPlacement::try_new(
            UserId::new(2),
            Price::ZERO,
            OrderStatus::default(),
            vec![],
        )
        .expect_err("empty placement");
        assert_eq!(err, OrderValidationError::NoLines);
        assert_eq!(err.field(), "items");
    }

    #[rstest]
    fn placement_rejects_zero_quantity() {
        let err = OrderPlacement::try_new(
            UserId::new(2),
            Price::ZERO,
            OrderStatus::default(),
            vec![line(1), line(0)],
        )
        .expect_err("zero quantity");
        assert_eq!(err, OrderValidationError::ZeroQuantity { line: 1 });
        assert_eq!(err.field(), "items[1].quantity");
    }

    #[rstest]
    fn order_details_flatten_order_fields() {
        let order = NewOrder {
            user_id: UserId::new(2),
            total: Price::new(89.99).expect("valid price"),
            status: OrderStatus::default(),
        }
        .into_order(OrderId::new(1), Utc::now());
        let details = OrderDetails {
            order,
            items: Vec::new(),
        };
        let value = serde_json::to_value(&details).expect("serialise");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["userId"], 2);
        assert_eq!(value["items"], serde_json::json!([]));
    }
}
