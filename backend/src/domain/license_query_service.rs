//! License read service.
//!
//! Joins stored licenses with their product and license type. The join is
//! read-side only: a deleted product or license type shows up as `None`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::catalogue_service::map_catalogue_error;
use crate::domain::ports::{
    CatalogueRepository, LicenseRepository, LicenseRepositoryError, LicensesQuery,
};
use crate::domain::{
    Error, License, LicenseDetails, LicenseKey, LicenseType, LicenseTypeId, Product, ProductId,
    UserId,
};

/// Look up the product and license type a record points at.
pub(crate) async fn resolve_references<C>(
    catalogue: &C,
    product_id: ProductId,
    license_type_id: LicenseTypeId,
) -> Result<(Option<Product>, Option<LicenseType>), Error>
where
    C: CatalogueRepository + ?Sized,
{
    let product = catalogue
        .find_product(product_id)
        .await
        .map_err(map_catalogue_error)?;
    let license_type = catalogue
        .find_license_type(license_type_id)
        .await
        .map_err(map_catalogue_error)?;
    Ok((product, license_type))
}

#[derive(Clone)]
pub struct LicenseQueryService<L, C> {
    licenses: Arc<L>,
    catalogue: Arc<C>,
}

impl<L, C> LicenseQueryService<L, C> {
    pub fn new(licenses: Arc<L>, catalogue: Arc<C>) -> Self {
        Self {
            licenses,
            catalogue,
        }
    }
}

fn map_license_error(error: LicenseRepositoryError) -> Error {
    match error {
        LicenseRepositoryError::Query { message } => {
            Error::internal(format!("license repository error: {message}"))
        }
    }
}

impl<L, C> LicenseQueryService<L, C>
where
    L: LicenseRepository,
    C: CatalogueRepository,
{
    async fn enrich(&self, license: License) -> Result<LicenseDetails, Error> {
        let (product, license_type) = resolve_references(
            self.catalogue.as_ref(),
            license.product_id,
            license.license_type_id,
        )
        .await?;
        Ok(LicenseDetails {
            license,
            product,
            license_type,
        })
    }

    async fn enrich_all(&self, licenses: Vec<License>) -> Result<Vec<LicenseDetails>, Error> {
        let mut details = Vec::with_capacity(licenses.len());
        for license in licenses {
            details.push(self.enrich(license).await?);
        }
        Ok(details)
    }
}

#[async_trait]
impl<L, C> LicensesQuery for LicenseQueryService<L, C>
where
    L: LicenseRepository,
    C: CatalogueRepository,
{
    async fn licenses_for_user(&self, user_id: UserId) -> Result<Vec<LicenseDetails>, Error> {
        let licenses = self
            .licenses
            .list_licenses_for_user(user_id)
            .await
            .map_err(map_license_error)?;
        self.enrich_all(licenses).await
    }

    async fn active_licenses_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<LicenseDetails>, Error> {
        let licenses = self
            .licenses
            .list_licenses_by_status(user_id, true)
            .await
            .map_err(map_license_error)?;
        self.enrich_all(licenses).await
    }

    async fn license_by_key(&self, key: &LicenseKey) -> Result<LicenseDetails, Error> {
        let license = self
            .licenses
            .find_license_by_key(key)
            .await
            .map_err(map_license_error)?
            .ok_or_else(|| Error::not_found("License not found"))?;
        self.enrich(license).await
    }
}
