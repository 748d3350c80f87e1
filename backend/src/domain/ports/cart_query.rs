//! Driving port for pricing a cart before checkout.

use async_trait::async_trait;

use crate::domain::{CartQuote, Error, LineSelection};

#[async_trait]
pub trait CartQuery: Send + Sync {
    /// Resolve each selection against the catalogue and price the result.
    ///
    /// Unknown products or license types yield `invalid_request`.
    async fn quote(&self, lines: Vec<LineSelection>) -> Result<CartQuote, Error>;
}
