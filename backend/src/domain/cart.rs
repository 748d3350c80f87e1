//! Shopping cart pricing.
//!
//! The cart mirrors what a browser session holds before checkout: snapshots
//! of the chosen product and license type per line, each with a synthetic
//! id. Totals apply a flat sales tax on top of the line subtotal.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    LicenseType, LicenseTypeId, LineSelection, OrderPlacement, OrderStatus, OrderValidationError,
    Price, Product, ProductId, UserId,
};

/// Sales tax applied at checkout.
pub const TAX_RATE: f64 = 0.06;

/// A cart line holding snapshots of the selected records.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    #[schema(value_type = u32)]
    pub product_id: ProductId,
    pub product: Product,
    #[schema(value_type = u32)]
    pub license_type_id: LicenseTypeId,
    pub license_type: LicenseType,
    pub quantity: u32,
}

impl CartItem {
    /// Unit price of the license type times the quantity.
    pub fn line_total(&self) -> Price {
        self.license_type.price.times(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line and return its generated id.
    pub fn add(&mut self, product: Product, license_type: LicenseType, quantity: u32) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(CartItem {
            id,
            product_id: product.id,
            product,
            license_type_id: license_type.id,
            license_type,
            quantity,
        });
        id
    }

    /// Remove a line; returns whether it was present.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subtotal(&self) -> Price {
        self.items
            .iter()
            .fold(Price::ZERO, |acc, item| acc.plus(item.line_total()))
    }

    pub fn tax(&self) -> Price {
        self.subtotal().scaled(TAX_RATE)
    }

    pub fn total(&self) -> Price {
        self.subtotal().plus(self.tax())
    }

    /// Priced snapshot of the cart.
    pub fn quote(&self) -> CartQuote {
        CartQuote {
            items: self.items.clone(),
            subtotal: self.subtotal(),
            tax: self.tax(),
            total: self.total(),
        }
    }

    /// Convert the cart into a checkout placement charging the taxed total.
    pub fn into_placement(self, user_id: UserId) -> Result<OrderPlacement, OrderValidationError> {
        let total = self.total();
        let lines = self
            .items
            .into_iter()
            .map(|item| LineSelection {
                product_id: item.product_id,
                license_type_id: item.license_type_id,
                quantity: item.quantity,
            })
            .collect();
        OrderPlacement::try_new(user_id, total, OrderStatus::default(), lines)
    }
}

/// Cart contents with computed totals.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartQuote {
    pub items: Vec<CartItem>,
    #[schema(value_type = f64)]
    pub subtotal: Price,
    #[schema(value_type = f64)]
    pub tax: Price,
    #[schema(value_type = f64)]
    pub total: Price,
}
