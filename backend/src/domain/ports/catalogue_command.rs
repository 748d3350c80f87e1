//! Driving port for the admin catalogue surface.

use async_trait::async_trait;

use crate::domain::{
    Category, Error, LicenseType, LicenseTypeId, LicenseTypePatch, NewLicenseType, NewProduct,
    Product, ProductId, ProductPatch,
};

#[async_trait]
pub trait CatalogueCommand: Send + Sync {
    async fn create_product(&self, product: NewProduct) -> Result<Product, Error>;

    async fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product, Error>;

    /// Returns whether the product existed.
    async fn delete_product(&self, id: ProductId) -> Result<bool, Error>;

    async fn create_license_type(&self, license_type: NewLicenseType)
    -> Result<LicenseType, Error>;

    async fn update_license_type(
        &self,
        id: LicenseTypeId,
        patch: LicenseTypePatch,
    ) -> Result<LicenseType, Error>;

    /// Returns whether the license type existed.
    async fn delete_license_type(&self, id: LicenseTypeId) -> Result<bool, Error>;

    /// The admin-managed category set.
    async fn categories(&self) -> Result<Vec<Category>, Error>;

    async fn create_category(&self, category: Category) -> Result<Category, Error>;

    /// Returns whether the category existed.
    async fn delete_category(&self, name: &str) -> Result<bool, Error>;
}
