//! `CatalogueRepository` over the in-memory store.
//!
//! Filters are linear scans. Category matching is exact and case-sensitive.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{
    Category, LicenseType, LicenseTypeId, LicenseTypePatch, NewLicenseType, NewProduct, Product,
    ProductId, ProductPatch,
};

use super::memory_store::{MemoryStore, SequenceExhausted};

fn map_sequence_error(error: SequenceExhausted) -> CatalogueRepositoryError {
    CatalogueRepositoryError::query(error.to_string())
}

#[async_trait]
impl CatalogueRepository for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogueRepositoryError> {
        Ok(self.tables().read().products.values().cloned().collect())
    }

    async fn list_featured_products(&self) -> Result<Vec<Product>, CatalogueRepositoryError> {
        let tables = self.tables().read();
        Ok(tables
            .products
            .values()
            .filter(|product| product.is_featured())
            .cloned()
            .collect())
    }

    async fn list_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, CatalogueRepositoryError> {
        let tables = self.tables().read();
        Ok(tables
            .products
            .values()
            .filter(|product| product.category == category)
            .cloned()
            .collect())
    }

    async fn find_product(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, CatalogueRepositoryError> {
        Ok(self.tables().read().products.get(&id).cloned())
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<Product, CatalogueRepositoryError> {
        let created_at = self.now();
        let mut tables = self.tables().write();
        let id = ProductId::new(
            tables
                .sequences
                .products
                .advance()
                .map_err(map_sequence_error)?,
        );
        let product = product.into_product(id, created_at);
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, CatalogueRepositoryError> {
        let mut tables = self.tables().write();
        let product = tables
            .products
            .get_mut(&id)
            .ok_or_else(|| CatalogueRepositoryError::product_not_found(id))?;
        patch.apply(product);
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, CatalogueRepositoryError> {
        Ok(self.tables().write().products.remove(&id).is_some())
    }

    async fn list_license_types(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<LicenseType>, CatalogueRepositoryError> {
        let tables = self.tables().read();
        Ok(tables
            .license_types
            .values()
            .filter(|license_type| license_type.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn find_license_type(
        &self,
        id: LicenseTypeId,
    ) -> Result<Option<LicenseType>, CatalogueRepositoryError> {
        Ok(self.tables().read().license_types.get(&id).cloned())
    }

    async fn create_license_type(
        &self,
        license_type: NewLicenseType,
    ) -> Result<LicenseType, CatalogueRepositoryError> {
        let mut tables = self.tables().write();
        let id = LicenseTypeId::new(
            tables
                .sequences
                .license_types
                .advance()
                .map_err(map_sequence_error)?,
        );
        let license_type = license_type.into_license_type(id);
        tables.license_types.insert(id, license_type.clone());
        Ok(license_type)
    }

    async fn update_license_type(
        &self,
        id: LicenseTypeId,
        patch: LicenseTypePatch,
    ) -> Result<LicenseType, CatalogueRepositoryError> {
        let mut tables = self.tables().write();
        let license_type = tables
            .license_types
            .get_mut(&id)
            .ok_or_else(|| CatalogueRepositoryError::license_type_not_found(id))?;
        patch.apply(license_type);
        Ok(license_type.clone())
    }

    async fn delete_license_type(
        &self,
        id: LicenseTypeId,
    ) -> Result<bool, CatalogueRepositoryError> {
        Ok(self.tables().write().license_types.remove(&id).is_some())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogueRepositoryError> {
        Ok(self.tables().read().categories.iter().cloned().collect())
    }

    async fn list_product_categories(&self) -> Result<Vec<Category>, CatalogueRepositoryError> {
        let tables = self.tables().read();
        let derived: BTreeSet<Category> = tables
            .products
            .values()
            .filter_map(|product| Category::verbatim(&product.category))
            .collect();
        Ok(derived.into_iter().collect())
    }

    async fn create_category(
        &self,
        category: Category,
    ) -> Result<Category, CatalogueRepositoryError> {
        self.tables().write().categories.insert(category.clone());
        Ok(category)
    }

    async fn delete_category(&self, name: &str) -> Result<bool, CatalogueRepositoryError> {
        let mut tables = self.tables().write();
        let before = tables.categories.len();
        tables
            .categories
            .retain(|category| category.as_str() != name);
        Ok(tables.categories.len() < before)
    }
}
