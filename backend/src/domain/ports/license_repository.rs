//! Driven port for reading issued licenses.
//!
//! Licenses are only ever written as part of a sale, through
//! [`OrderRepository::record_sale`](super::OrderRepository::record_sale).

use async_trait::async_trait;

use crate::domain::{License, LicenseKey, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by license storage adapters.
    pub enum LicenseRepositoryError {
        Query { message: String } => "license query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LicenseRepository: Send + Sync {
    /// All licenses held by `user_id`, in issue order.
    async fn list_licenses_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<License>, LicenseRepositoryError>;

    /// Licenses held by `user_id` whose active flag equals `is_active`.
    async fn list_licenses_by_status(
        &self,
        user_id: UserId,
        is_active: bool,
    ) -> Result<Vec<License>, LicenseRepositoryError>;

    async fn find_license_by_key(
        &self,
        key: &LicenseKey,
    ) -> Result<Option<License>, LicenseRepositoryError>;
}
