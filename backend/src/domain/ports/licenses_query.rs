//! Driving port for license reads. Results are joined with their product
//! and license type.

use async_trait::async_trait;

use crate::domain::{Error, LicenseDetails, LicenseKey, UserId};

#[async_trait]
pub trait LicensesQuery: Send + Sync {
    async fn licenses_for_user(&self, user_id: UserId) -> Result<Vec<LicenseDetails>, Error>;

    async fn active_licenses_for_user(&self, user_id: UserId)
    -> Result<Vec<LicenseDetails>, Error>;

    /// One license by key, or `not_found`.
    async fn license_by_key(&self, key: &LicenseKey) -> Result<LicenseDetails, Error>;
}
