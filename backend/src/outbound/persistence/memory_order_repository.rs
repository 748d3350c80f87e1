//! `OrderRepository` over the in-memory store, including the sale commit.
//!
//! A sale is committed under one write guard. References are rechecked,
//! ids are allocated from a scratch copy of the sequences, and every record
//! is built before the first insert. Any failure returns before the tables
//! change, so a rejected sale leaves no trace.

use async_trait::async_trait;

use crate::domain::ports::{NewSale, OrderRepository, OrderRepositoryError, RecordedSale};
use crate::domain::{LicenseId, Order, OrderId, OrderItem, OrderItemId, UserId};

use super::memory_store::{MemoryStore, SequenceExhausted};

fn map_sequence_error(error: SequenceExhausted) -> OrderRepositoryError {
    OrderRepositoryError::query(error.to_string())
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn record_sale(&self, sale: NewSale) -> Result<RecordedSale, OrderRepositoryError> {
        let created_at = self.now();
        let mut tables = self.tables().write();

        if let Some(line) = sale.lines.iter().find(|line| {
            !tables.products.contains_key(&line.item.product_id)
                || !tables.license_types.contains_key(&line.item.license_type_id)
        }) {
            return Err(OrderRepositoryError::invalid_reference(
                line.item.product_id,
                line.item.license_type_id,
            ));
        }

        let mut sequences = tables.sequences;
        let order_id = OrderId::new(sequences.orders.advance().map_err(map_sequence_error)?);
        let order = sale.order.into_order(order_id, created_at);
        let mut order_items = Vec::with_capacity(sale.lines.len());
        let mut licenses = Vec::with_capacity(sale.lines.len());
        for line in sale.lines {
            let item_id =
                OrderItemId::new(sequences.order_items.advance().map_err(map_sequence_error)?);
            let license_id =
                LicenseId::new(sequences.licenses.advance().map_err(map_sequence_error)?);
            order_items.push(line.item.into_order_item(item_id, order_id));
            licenses.push(line.license.into_license(license_id, created_at));
        }

        tables.sequences = sequences;
        tables.orders.insert(order_id, order.clone());
        for item in &order_items {
            tables.order_items.insert(item.id, item.clone());
        }
        for license in &licenses {
            tables.licenses.insert(license.id, license.clone());
        }

        Ok(RecordedSale {
            order,
            order_items,
            licenses,
        })
    }

    async fn list_orders_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Order>, OrderRepositoryError> {
        let tables = self.tables().read();
        Ok(tables
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrderRepositoryError> {
        Ok(self.tables().read().orders.values().cloned().collect())
    }

    async fn list_order_items(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderItem>, OrderRepositoryError> {
        let tables = self.tables().read();
        Ok(tables
            .order_items
            .values()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect())
    }
}
