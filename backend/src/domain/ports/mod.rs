//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound storage adapters.
//! Driving ports (queries and commands) are implemented by domain services
//! and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod cart_query;
mod catalogue_command;
mod catalogue_query;
mod catalogue_repository;
mod license_repository;
mod licenses_query;
mod login_service;
mod order_command;
mod order_repository;
mod orders_query;
mod user_registration;
mod user_repository;
mod users_query;

pub use cart_query::CartQuery;
pub use catalogue_command::CatalogueCommand;
pub use catalogue_query::CatalogueQuery;
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use catalogue_repository::{CatalogueRepository, CatalogueRepositoryError};
#[cfg(test)]
pub use license_repository::MockLicenseRepository;
pub use license_repository::{LicenseRepository, LicenseRepositoryError};
pub use licenses_query::LicensesQuery;
pub use login_service::LoginService;
pub use order_command::OrderCommand;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{
    NewSale, OrderRepository, OrderRepositoryError, RecordedSale, SaleLine,
};
pub use orders_query::OrdersQuery;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_query::UsersQuery;
