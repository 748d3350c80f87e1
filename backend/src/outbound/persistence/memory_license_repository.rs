//! `LicenseRepository` over the in-memory store. Licenses are only written
//! by the sale commit in `memory_order_repository`.

use async_trait::async_trait;

use crate::domain::ports::{LicenseRepository, LicenseRepositoryError};
use crate::domain::{License, LicenseKey, UserId};

use super::memory_store::MemoryStore;

#[async_trait]
impl LicenseRepository for MemoryStore {
    async fn list_licenses_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<License>, LicenseRepositoryError> {
        let tables = self.tables().read();
        Ok(tables
            .licenses
            .values()
            .filter(|license| license.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_licenses_by_status(
        &self,
        user_id: UserId,
        is_active: bool,
    ) -> Result<Vec<License>, LicenseRepositoryError> {
        let tables = self.tables().read();
        Ok(tables
            .licenses
            .values()
            .filter(|license| license.user_id == user_id && license.is_active == is_active)
            .cloned()
            .collect())
    }

    async fn find_license_by_key(
        &self,
        key: &LicenseKey,
    ) -> Result<Option<License>, LicenseRepositoryError> {
        let tables = self.tables().read();
        Ok(tables
            .licenses
            .values()
            .find(|license| &license.license_key == key)
            .cloned())
    }
}
