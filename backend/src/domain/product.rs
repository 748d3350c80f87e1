//! Catalogue products.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Price, ProductId};

/// Validation failures for product input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyName,
    EmptyCategory,
    EmptyPatch,
}

impl ProductValidationError {
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyCategory => "category",
            Self::EmptyPatch => "body",
        }
    }
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "product name must not be empty"),
            Self::EmptyCategory => write!(f, "product category must not be empty"),
            Self::EmptyPatch => write!(f, "update must change at least one field"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// A sellable software product.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(value_type = u32, example = 1)]
    pub id: ProductId,
    #[schema(example = "Developer Suite Pro")]
    pub name: String,
    pub description: String,
    pub short_description: String,
    #[schema(value_type = f64, example = 89.99)]
    pub price: Price,
    pub image_url: String,
    /// Free-text category, matched exactly by category queries.
    #[schema(example = "Development Tools")]
    pub category: String,
    pub is_popular: bool,
    pub is_best_seller: bool,
    pub is_new: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// A product is featured when any merchandising flag is set.
    ///
    /// # Examples
    /// ```
    /// # use storefront::domain::{NewProduct, Price, ProductId};
    /// # use chrono::Utc;
    /// let mut product = NewProduct {
    ///     name: "Tool".into(),
    ///     description: String::new(),
    ///     short_description: String::new(),
    ///     price: Price::ZERO,
    ///     image_url: String::new(),
    ///     category: "Utilities".into(),
    ///     is_popular: false,
    ///     is_best_seller: false,
    ///     is_new: false,
    /// }
    /// .into_product(ProductId::new(1), Utc::now());
    /// assert!(!product.is_featured());
    /// product.is_new = true;
    /// assert!(product.is_featured());
    /// ```
    pub fn is_featured(&self) -> bool {
        self.is_popular || self.is_best_seller || self.is_new
    }
}

/// Input for creating a product. Merchandising flags default to false.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub short_description: String,
    pub price: Price,
    pub image_url: String,
    pub category: String,
    pub is_popular: bool,
    pub is_best_seller: bool,
    pub is_new: bool,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if self.category.trim().is_empty() {
            return Err(ProductValidationError::EmptyCategory);
        }
        Ok(())
    }

    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            short_description: self.short_description,
            price: self.price,
            image_url: self.image_url,
            category: self.category,
            is_popular: self.is_popular,
            is_best_seller: self.is_best_seller,
            is_new: self.is_new,
            created_at,
        }
    }
}

/// Fields an administrator may change on an existing product.
///
/// `None` leaves the stored value untouched. The id and creation time are
/// never updatable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<Price>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_popular: Option<bool>,
    pub is_best_seller: Option<bool>,
    pub is_new: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Reject patches that would leave the product in an invalid state.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.is_empty() {
            return Err(ProductValidationError::EmptyPatch);
        }
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ProductValidationError::EmptyName);
        }
        if self
            .category
            .as_deref()
            .is_some_and(|category| category.trim().is_empty())
        {
            return Err(ProductValidationError::EmptyCategory);
        }
        Ok(())
    }

    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(short_description) = self.short_description {
            product.short_description = short_description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = image_url;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(flag) = self.is_popular {
            product.is_popular = flag;
        }
        if let Some(flag) = self.is_best_seller {
            product.is_best_seller = flag;
        }
        if let Some(flag) = self.is_new {
            product.is_new = flag;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn new_product() -> NewProduct {
        NewProduct {
            name: "Security Scanner".to_owned(),
            description: "Finds vulnerabilities.".to_owned(),
            short_description: "Finds vulnerabilities.".to_owned(),
            price: Price::new(49.0).expect("valid price"),
            image_url: "https://example.test/scanner.png".to_owned(),
            category: "Security Tools".to_owned(),
            is_popular: false,
            is_best_seller: false,
            is_new: false,
        }
    }

    #[rstest]
    #[case(false, false, false, false)]
    #[case(true, false, false, true)]
    #[case(false, true, false, true)]
    #[case(false, false, true, true)]
    fn featured_when_any_flag_set(
        new_product: NewProduct,
        #[case] popular: bool,
        #[case] best_seller: bool,
        #[case] is_new: bool,
        #[case] expected: bool,
    ) {
        let product = NewProduct {
            is_popular: popular,
            is_best_seller: best_seller,
            is_new,
            ..new_product
        }
        .into_product(ProductId::new(1), Utc::now());
        assert_eq!(product.is_featured(), expected);
    }

    #[rstest]
    fn new_product_requires_name_and_category(new_product: NewProduct) {
        let unnamed = NewProduct {
            name: "  ".to_owned(),
            ..new_product.clone()
        };
        assert_eq!(unnamed.validate(), Err(ProductValidationError::EmptyName));
        let uncategorised = NewProduct {
            category: String::new(),
            ..new_product
        };
        assert_eq!(
            uncategorised.validate(),
            Err(ProductValidationError::EmptyCategory)
        );
    }

    #[rstest]
    fn patch_only_touches_named_fields(new_product: NewProduct) {
        let mut product = new_product.into_product(ProductId::new(4), Utc::now());
        let before = product.clone();
        let patch = ProductPatch {
            price: Some(Price::new(59.0).expect("valid price")),
            is_new: Some(true),
            ..ProductPatch::default()
        };
        patch.validate().expect("valid patch");
        patch.apply(&mut product);

        assert_eq!(product.price.amount(), 59.0);
        assert!(product.is_new);
        assert_eq!(product.name, before.name);
        assert_eq!(product.category, before.category);
        assert_eq!(product.created_at, before.created_at);
    }

    #[rstest]
    #[case(ProductPatch::default(), ProductValidationError::EmptyPatch)]
    #[case(
        ProductPatch { name: Some(String::new()), ..ProductPatch::default() },
        ProductValidationError::EmptyName
    )]
    #[case(
        ProductPatch { category: Some(" ".to_owned()), ..ProductPatch::default() },
        ProductValidationError::EmptyCategory
    )]
    fn patch_validation_rejects_invalid_changes(
        #[case] patch: ProductPatch,
        #[case] expected: ProductValidationError,
    ) {
        assert_eq!(patch.validate(), Err(expected));
    }
}
