//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CartQuery, CatalogueCommand, CatalogueQuery, LicensesQuery, LoginService, OrderCommand,
    OrdersQuery, UserRegistration, UsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub catalogue_admin: Arc<dyn CatalogueCommand>,
    pub cart: Arc<dyn CartQuery>,
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub users: Arc<dyn UsersQuery>,
    pub licenses: Arc<dyn LicensesQuery>,
    pub orders: Arc<dyn OrderCommand>,
    pub orders_query: Arc<dyn OrdersQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub catalogue_admin: Arc<dyn CatalogueCommand>,
    pub cart: Arc<dyn CartQuery>,
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub users: Arc<dyn UsersQuery>,
    pub licenses: Arc<dyn LicensesQuery>,
    pub orders: Arc<dyn OrderCommand>,
    pub orders_query: Arc<dyn OrdersQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use storefront::domain::{
    ///     AccountService, CatalogueService, LicenseQueryService, OrderFulfilmentService,
    /// };
    /// use storefront::inbound::http::state::{HttpState, HttpStatePorts};
    /// use storefront::outbound::persistence::MemoryStore;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let store = Arc::new(MemoryStore::new(clock.clone()));
    /// let catalogue = Arc::new(CatalogueService::new(store.clone()));
    /// let accounts = Arc::new(AccountService::new(store.clone()));
    /// let ports = HttpStatePorts {
    ///     catalogue: catalogue.clone(),
    ///     catalogue_admin: catalogue.clone(),
    ///     cart: catalogue,
    ///     login: accounts.clone(),
    ///     registration: accounts.clone(),
    ///     users: accounts,
    ///     licenses: Arc::new(LicenseQueryService::new(store.clone(), store.clone())),
    ///     orders: Arc::new(OrderFulfilmentService::new(
    ///         store.clone(),
    ///         store.clone(),
    ///         clock.clone(),
    ///     )),
    ///     orders_query: Arc::new(OrderFulfilmentService::new(store.clone(), store, clock)),
    /// };
    /// let state = HttpState::new(ports);
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            catalogue,
            catalogue_admin,
            cart,
            login,
            registration,
            users,
            licenses,
            orders,
            orders_query,
        } = ports;
        Self {
            catalogue,
            catalogue_admin,
            cart,
            login,
            registration,
            users,
            licenses,
            orders,
            orders_query,
        }
    }
}
