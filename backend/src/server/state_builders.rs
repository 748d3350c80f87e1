//! Builders for the store and the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;
use tracing::info;

use storefront::domain::{
    AccountService, CatalogueService, LicenseQueryService, OrderFulfilmentService,
};
use storefront::inbound::http::state::{HttpState, HttpStatePorts};
use storefront::outbound::persistence::{MemoryStore, SeedError};

/// Create the process-lifetime store, seeded when requested.
pub(super) fn build_store(
    clock: Arc<dyn Clock>,
    seed_enabled: bool,
) -> Result<Arc<MemoryStore>, SeedError> {
    let store = if seed_enabled {
        let store = MemoryStore::seeded(clock)?;
        info!("store seeded with demo catalogue and accounts");
        store
    } else {
        MemoryStore::new(clock)
    };
    Ok(Arc::new(store))
}

/// Wire every domain service over the shared store into handler state.
pub(super) fn build_http_state(
    store: &Arc<MemoryStore>,
    clock: Arc<dyn Clock>,
) -> web::Data<HttpState> {
    let catalogue = Arc::new(CatalogueService::new(Arc::clone(store)));
    let accounts = Arc::new(AccountService::new(Arc::clone(store)));
    let licenses = Arc::new(LicenseQueryService::new(Arc::clone(store), Arc::clone(store)));
    let fulfilment = Arc::new(OrderFulfilmentService::new(
        Arc::clone(store),
        Arc::clone(store),
        clock,
    ));

    web::Data::new(HttpState::new(HttpStatePorts {
        catalogue: catalogue.clone(),
        catalogue_admin: catalogue.clone(),
        cart: catalogue,
        login: accounts.clone(),
        registration: accounts.clone(),
        users: accounts,
        licenses,
        orders: fulfilment.clone(),
        orders_query: fulfilment,
    }))
}
