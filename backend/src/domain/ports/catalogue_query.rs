//! Driving port for customer-facing catalogue reads.

use async_trait::async_trait;

use crate::domain::{Category, Error, LicenseType, Product, ProductId};

#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    async fn products(&self) -> Result<Vec<Product>, Error>;

    /// Products with any of the popular, best-seller, or new flags set.
    async fn featured_products(&self) -> Result<Vec<Product>, Error>;

    /// Products whose category equals `category` exactly.
    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, Error>;

    /// One product, or `not_found`.
    async fn product(&self, id: ProductId) -> Result<Product, Error>;

    /// License types offered for a product. Unknown products yield an empty
    /// list.
    async fn license_types(&self, product_id: ProductId) -> Result<Vec<LicenseType>, Error>;

    /// Categories derived from the stored products.
    async fn product_categories(&self) -> Result<Vec<Category>, Error>;
}
