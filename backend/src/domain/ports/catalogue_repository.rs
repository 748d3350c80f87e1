//! Driven port for catalogue storage: products, license types, and the
//! admin-managed category set.

use async_trait::async_trait;

use crate::domain::{
    Category, LicenseType, LicenseTypeId, LicenseTypePatch, NewLicenseType, NewProduct, Product,
    ProductId, ProductPatch,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue storage adapters.
    pub enum CatalogueRepositoryError {
        /// The backing store rejected the operation.
        Query { message: String } => "catalogue query failed: {message}",
        /// Update targeted a product that does not exist.
        ProductNotFound { id: ProductId } => "product {id} not found",
        /// Update targeted a license type that does not exist.
        LicenseTypeNotFound { id: LicenseTypeId } => "license type {id} not found",
    }
}

/// Catalogue storage.
///
/// Listing methods return records in id order. Category filters compare
/// exactly and case-sensitively.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogueRepositoryError>;

    /// Products with at least one merchandising flag set.
    async fn list_featured_products(&self) -> Result<Vec<Product>, CatalogueRepositoryError>;

    async fn list_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, CatalogueRepositoryError>;

    async fn find_product(&self, id: ProductId)
    -> Result<Option<Product>, CatalogueRepositoryError>;

    async fn create_product(&self, product: NewProduct)
    -> Result<Product, CatalogueRepositoryError>;

    /// Apply `patch` to a stored product.
    ///
    /// Fails with [`CatalogueRepositoryError::ProductNotFound`] for an
    /// unknown id.
    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, CatalogueRepositoryError>;

    /// Remove a product without touching its license types or licenses.
    /// Returns whether the product existed.
    async fn delete_product(&self, id: ProductId) -> Result<bool, CatalogueRepositoryError>;

    async fn list_license_types(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<LicenseType>, CatalogueRepositoryError>;

    async fn find_license_type(
        &self,
        id: LicenseTypeId,
    ) -> Result<Option<LicenseType>, CatalogueRepositoryError>;

    async fn create_license_type(
        &self,
        license_type: NewLicenseType,
    ) -> Result<LicenseType, CatalogueRepositoryError>;

    async fn update_license_type(
        &self,
        id: LicenseTypeId,
        patch: LicenseTypePatch,
    ) -> Result<LicenseType, CatalogueRepositoryError>;

    async fn delete_license_type(&self, id: LicenseTypeId)
    -> Result<bool, CatalogueRepositoryError>;

    /// Admin-managed category set, sorted by name.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogueRepositoryError>;

    /// Distinct non-empty `category` values of stored products, sorted.
    async fn list_product_categories(&self) -> Result<Vec<Category>, CatalogueRepositoryError>;

    /// Insert into the admin set. Inserting an existing name is a no-op.
    async fn create_category(&self, category: Category)
    -> Result<Category, CatalogueRepositoryError>;

    async fn delete_category(&self, name: &str) -> Result<bool, CatalogueRepositoryError>;
}
