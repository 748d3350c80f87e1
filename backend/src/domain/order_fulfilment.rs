//! Order fulfilment: turns a checkout into an order, its items, and one
//! freshly issued license per line.
//!
//! Placement runs as a unit of work. Every line is resolved and staged
//! first; the order, items, and licenses are then committed together by
//! [`OrderRepository::record_sale`]. A bad reference on any line leaves no
//! records behind.
//!
//! Quantity only affects the recorded item. Each line issues exactly one
//! license whatever its quantity.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::catalogue_service::invalid_reference;
use crate::domain::license_query_service::resolve_references;
use crate::domain::ports::{
    CatalogueRepository, NewSale, OrderCommand, OrderRepository, OrderRepositoryError,
    OrdersQuery, SaleLine,
};
use crate::domain::{
    Error, ErrorCode, LicenseDetails, LicenseKeyGenerator, LicenseType, LineSelection, NewLicense,
    NewOrder, NewOrderItem, Order, OrderDetails, OrderItemDetails, OrderPlacement, PlacedOrder,
    Price, Product, UserId, expiry_for,
};

/// Domain service implementing checkout and order histories.
#[derive(Clone)]
pub struct OrderFulfilmentService<O, C> {
    orders: Arc<O>,
    catalogue: Arc<C>,
    keys: LicenseKeyGenerator<C>,
    clock: Arc<dyn Clock>,
}

impl<O, C> OrderFulfilmentService<O, C> {
    pub fn new(orders: Arc<O>, catalogue: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            orders,
            keys: LicenseKeyGenerator::new(Arc::clone(&catalogue)),
            catalogue,
            clock,
        }
    }
}

fn map_order_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Query { message } => {
            Error::internal(format!("order repository error: {message}"))
        }
        OrderRepositoryError::InvalidReference {
            product_id,
            license_type_id,
        } => invalid_reference(product_id, license_type_id),
    }
}

/// A line whose references have been resolved, ready to stage.
struct ResolvedLine {
    selection: LineSelection,
    product: Product,
    license_type: LicenseType,
}

impl<O, C> OrderFulfilmentService<O, C>
where
    O: OrderRepository,
    C: CatalogueRepository,
{
    async fn resolve_line(&self, selection: LineSelection) -> Result<ResolvedLine, Error> {
        let (product, license_type) = resolve_references(
            self.catalogue.as_ref(),
            selection.product_id,
            selection.license_type_id,
        )
        .await?;
        match (product, license_type) {
            (Some(product), Some(license_type)) => Ok(ResolvedLine {
                selection,
                product,
                license_type,
            }),
            _ => Err(invalid_reference(
                selection.product_id,
                selection.license_type_id,
            )),
        }
    }

    async fn stage_line(
        &self,
        user_id: UserId,
        line: &ResolvedLine,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<SaleLine, Error> {
        let LineSelection {
            product_id,
            license_type_id,
            quantity,
        } = line.selection;
        let license_key = self
            .keys
            .generate(product_id, license_type_id)
            .await
            .map_err(|err| match err.code() {
                ErrorCode::NotFound => invalid_reference(product_id, license_type_id),
                _ => err,
            })?;
        Ok(SaleLine {
            item: NewOrderItem {
                product_id,
                license_type_id,
                quantity,
                price: line.license_type.price,
            },
            license: NewLicense {
                user_id,
                product_id,
                license_type_id,
                license_key,
                is_active: true,
                expires_at: Some(expires_at),
            },
        })
    }

    async fn order_details(&self, order: Order) -> Result<OrderDetails, Error> {
        let items = self
            .orders
            .list_order_items(order.id)
            .await
            .map_err(map_order_error)?;
        let mut enriched = Vec::with_capacity(items.len());
        for item in items {
            let (product, license_type) = resolve_references(
                self.catalogue.as_ref(),
                item.product_id,
                item.license_type_id,
            )
            .await?;
            enriched.push(OrderItemDetails {
                item,
                product,
                license_type,
            });
        }
        Ok(OrderDetails {
            order,
            items: enriched,
        })
    }

    async fn all_details(&self, orders: Vec<Order>) -> Result<Vec<OrderDetails>, Error> {
        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(self.order_details(order).await?);
        }
        Ok(details)
    }
}

#[async_trait]
impl<O, C> OrderCommand for OrderFulfilmentService<O, C>
where
    O: OrderRepository,
    C: CatalogueRepository,
{
    async fn place_order(&self, placement: OrderPlacement) -> Result<PlacedOrder, Error> {
        let issued_at = self.clock.utc();
        let expires_at = expiry_for(issued_at)
            .ok_or_else(|| Error::internal("license expiry is out of range"))?;

        let mut resolved = Vec::with_capacity(placement.lines().len());
        for selection in placement.lines() {
            match self.resolve_line(*selection).await {
                Ok(line) => resolved.push(line),
                Err(err) => {
                    warn!(
                        user_id = %placement.user_id,
                        product_id = %selection.product_id,
                        license_type_id = %selection.license_type_id,
                        "order rejected: invalid line"
                    );
                    return Err(err);
                }
            }
        }

        let mut lines = Vec::with_capacity(resolved.len());
        for line in &resolved {
            lines.push(self.stage_line(placement.user_id, line, expires_at).await?);
        }
        let subtotal = lines.iter().fold(Price::ZERO, |acc, line| {
            acc.plus(line.item.price.times(line.item.quantity))
        });

        let sale = NewSale {
            order: NewOrder {
                user_id: placement.user_id,
                total: placement.total,
                status: placement.status,
            },
            lines,
        };
        let recorded = self
            .orders
            .record_sale(sale)
            .await
            .map_err(map_order_error)?;

        info!(
            order_id = %recorded.order.id,
            user_id = %recorded.order.user_id,
            lines = recorded.order_items.len(),
            total = %recorded.order.total,
            subtotal = %subtotal,
            "order placed"
        );

        let licenses = recorded
            .licenses
            .into_iter()
            .zip(resolved)
            .map(|(license, line)| LicenseDetails {
                license,
                product: Some(line.product),
                license_type: Some(line.license_type),
            })
            .collect();
        Ok(PlacedOrder {
            order: recorded.order,
            order_items: recorded.order_items,
            licenses,
        })
    }
}

#[async_trait]
impl<O, C> OrdersQuery for OrderFulfilmentService<O, C>
where
    O: OrderRepository,
    C: CatalogueRepository,
{
    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<OrderDetails>, Error> {
        let orders = self
            .orders
            .list_orders_for_user(user_id)
            .await
            .map_err(map_order_error)?;
        self.all_details(orders).await
    }

    async fn all_orders(&self) -> Result<Vec<OrderDetails>, Error> {
        let orders = self.orders.list_orders().await.map_err(map_order_error)?;
        self.all_details(orders).await
    }
}

#[cfg(test)]
#[path = "order_fulfilment_tests.rs"]
mod tests;
