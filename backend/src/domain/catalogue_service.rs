//! Catalogue domain service.
//!
//! Implements the customer catalogue reads, the admin catalogue commands,
//! and cart pricing on top of a [`CatalogueRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CartQuery, CatalogueCommand, CatalogueQuery, CatalogueRepository, CatalogueRepositoryError,
};
use crate::domain::{
    Cart, CartQuote, Category, Error, LicenseType, LicenseTypeId, LicenseTypePatch, LineSelection,
    NewLicenseType, NewProduct, Product, ProductId, ProductPatch, validation_error,
};

#[derive(Clone)]
pub struct CatalogueService<R> {
    repo: Arc<R>,
}

impl<R> CatalogueService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

pub(crate) fn map_catalogue_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("catalogue repository error: {message}"))
        }
        CatalogueRepositoryError::ProductNotFound { id } => {
            Error::not_found("Product not found").with_details(json!({ "productId": id }))
        }
        CatalogueRepositoryError::LicenseTypeNotFound { id } => {
            Error::not_found("License type not found")
                .with_details(json!({ "licenseTypeId": id }))
        }
    }
}

/// Error for a selection naming a product or license type that does not
/// exist.
pub(crate) fn invalid_reference(product_id: ProductId, license_type_id: LicenseTypeId) -> Error {
    Error::invalid_request("Invalid product or license type").with_details(json!({
        "productId": product_id,
        "licenseTypeId": license_type_id,
        "code": "invalid_reference",
    }))
}

impl<R> CatalogueService<R>
where
    R: CatalogueRepository,
{
    async fn ensure_product_exists(&self, product_id: ProductId) -> Result<(), Error> {
        let found = self
            .repo
            .find_product(product_id)
            .await
            .map_err(map_catalogue_error)?;
        if found.is_none() {
            return Err(
                Error::invalid_request(format!("product {product_id} does not exist"))
                    .with_details(json!({
                        "field": "productId",
                        "code": "invalid_reference",
                    })),
            );
        }
        Ok(())
    }

    async fn resolve_selection(
        &self,
        line: &LineSelection,
    ) -> Result<(Product, LicenseType), Error> {
        let product = self
            .repo
            .find_product(line.product_id)
            .await
            .map_err(map_catalogue_error)?;
        let license_type = self
            .repo
            .find_license_type(line.license_type_id)
            .await
            .map_err(map_catalogue_error)?;
        match (product, license_type) {
            (Some(product), Some(license_type)) => Ok((product, license_type)),
            _ => Err(invalid_reference(line.product_id, line.license_type_id)),
        }
    }
}

#[async_trait]
impl<R> CatalogueQuery for CatalogueService<R>
where
    R: CatalogueRepository,
{
    async fn products(&self) -> Result<Vec<Product>, Error> {
        self.repo.list_products().await.map_err(map_catalogue_error)
    }

    async fn featured_products(&self) -> Result<Vec<Product>, Error> {
        self.repo
            .list_featured_products()
            .await
            .map_err(map_catalogue_error)
    }

    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, Error> {
        self.repo
            .list_products_by_category(category)
            .await
            .map_err(map_catalogue_error)
    }

    async fn product(&self, id: ProductId) -> Result<Product, Error> {
        self.repo
            .find_product(id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found("Product not found"))
    }

    async fn license_types(&self, product_id: ProductId) -> Result<Vec<LicenseType>, Error> {
        self.repo
            .list_license_types(product_id)
            .await
            .map_err(map_catalogue_error)
    }

    async fn product_categories(&self) -> Result<Vec<Category>, Error> {
        self.repo
            .list_product_categories()
            .await
            .map_err(map_catalogue_error)
    }
}

#[async_trait]
impl<R> CatalogueCommand for CatalogueService<R>
where
    R: CatalogueRepository,
{
    async fn create_product(&self, product: NewProduct) -> Result<Product, Error> {
        product
            .validate()
            .map_err(|err| validation_error(err.field(), &err))?;
        let created = self
            .repo
            .create_product(product)
            .await
            .map_err(map_catalogue_error)?;
        info!(product_id = %created.id, name = %created.name, "product created");
        Ok(created)
    }

    async fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product, Error> {
        patch
            .validate()
            .map_err(|err| validation_error(err.field(), &err))?;
        let updated = self
            .repo
            .update_product(id, patch)
            .await
            .map_err(map_catalogue_error)?;
        info!(product_id = %id, "product updated");
        Ok(updated)
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, Error> {
        let existed = self
            .repo
            .delete_product(id)
            .await
            .map_err(map_catalogue_error)?;
        if existed {
            info!(product_id = %id, "product deleted");
        }
        Ok(existed)
    }

    async fn create_license_type(
        &self,
        license_type: NewLicenseType,
    ) -> Result<LicenseType, Error> {
        license_type
            .validate()
            .map_err(|err| validation_error(err.field(), &err))?;
        self.ensure_product_exists(license_type.product_id).await?;
        let created = self
            .repo
            .create_license_type(license_type)
            .await
            .map_err(map_catalogue_error)?;
        info!(
            license_type_id = %created.id,
            product_id = %created.product_id,
            "license type created"
        );
        Ok(created)
    }

    async fn update_license_type(
        &self,
        id: LicenseTypeId,
        patch: LicenseTypePatch,
    ) -> Result<LicenseType, Error> {
        patch
            .validate()
            .map_err(|err| validation_error(err.field(), &err))?;
        if let Some(product_id) = patch.product_id {
            self.ensure_product_exists(product_id).await?;
        }
        let updated = self
            .repo
            .update_license_type(id, patch)
            .await
            .map_err(map_catalogue_error)?;
        info!(license_type_id = %id, "license type updated");
        Ok(updated)
    }

    async fn delete_license_type(&self, id: LicenseTypeId) -> Result<bool, Error> {
        let existed = self
            .repo
            .delete_license_type(id)
            .await
            .map_err(map_catalogue_error)?;
        if existed {
            info!(license_type_id = %id, "license type deleted");
        }
        Ok(existed)
    }

    async fn categories(&self) -> Result<Vec<Category>, Error> {
        self.repo.list_categories().await.map_err(map_catalogue_error)
    }

    async fn create_category(&self, category: Category) -> Result<Category, Error> {
        let created = self
            .repo
            .create_category(category)
            .await
            .map_err(map_catalogue_error)?;
        info!(category = %created.as_str(), "category created");
        Ok(created)
    }

    async fn delete_category(&self, name: &str) -> Result<bool, Error> {
        let existed = self
            .repo
            .delete_category(name)
            .await
            .map_err(map_catalogue_error)?;
        if existed {
            info!(category = %name, "category deleted");
        }
        Ok(existed)
    }
}

#[async_trait]
impl<R> CartQuery for CatalogueService<R>
where
    R: CatalogueRepository,
{
    async fn quote(&self, lines: Vec<LineSelection>) -> Result<CartQuote, Error> {
        let mut cart = Cart::new();
        for (index, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(validation_error(
                    format!("items[{index}].quantity"),
                    &"quantity must be at least 1",
                ));
            }
            let (product, license_type) = self.resolve_selection(line).await?;
            cart.add(product, license_type, line.quantity);
        }
        Ok(cart.quote())
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
