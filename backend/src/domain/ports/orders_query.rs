//! Driving port for order histories.

use async_trait::async_trait;

use crate::domain::{Error, OrderDetails, UserId};

#[async_trait]
pub trait OrdersQuery: Send + Sync {
    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<OrderDetails>, Error>;

    async fn all_orders(&self) -> Result<Vec<OrderDetails>, Error>;
}
