//! Driven port for orders and the sale unit of work.

use async_trait::async_trait;

use crate::domain::{
    License, LicenseTypeId, NewLicense, NewOrder, NewOrderItem, Order, OrderId, OrderItem,
    ProductId, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by order storage adapters.
    pub enum OrderRepositoryError {
        Query { message: String } => "order query failed: {message}",
        /// A staged line points at a product or license type that no longer
        /// exists at commit time.
        InvalidReference { product_id: ProductId, license_type_id: LicenseTypeId } =>
            "invalid reference: product {product_id}, license type {license_type_id}",
    }
}

/// One staged line of a sale: the order item and the license it issues.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLine {
    pub item: NewOrderItem,
    pub license: NewLicense,
}

/// Everything a sale writes, staged before any record exists.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub order: NewOrder,
    pub lines: Vec<SaleLine>,
}

/// Records written by [`OrderRepository::record_sale`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSale {
    pub order: Order,
    pub order_items: Vec<OrderItem>,
    pub licenses: Vec<License>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Commit an order with its items and licenses as one unit.
    ///
    /// Either every record is written or none is. References are checked
    /// again at commit time; a missing product or license type yields
    /// [`OrderRepositoryError::InvalidReference`] and writes nothing.
    async fn record_sale(&self, sale: NewSale) -> Result<RecordedSale, OrderRepositoryError>;

    async fn list_orders_for_user(&self, user_id: UserId)
    -> Result<Vec<Order>, OrderRepositoryError>;

    async fn list_orders(&self) -> Result<Vec<Order>, OrderRepositoryError>;

    async fn list_order_items(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderItem>, OrderRepositoryError>;
}
