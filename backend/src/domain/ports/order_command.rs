//! Driving port for checkout.

use async_trait::async_trait;

use crate::domain::{Error, OrderPlacement, PlacedOrder};

#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Record an order and issue one license per line.
    async fn place_order(&self, placement: OrderPlacement) -> Result<PlacedOrder, Error>;
}
