//! License types: the pricing and seat variants of a product.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{LicenseTypeId, Price, ProductId};

/// Seat count applied when a create request omits `maxUsers`.
pub const DEFAULT_MAX_USERS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseTypeValidationError {
    EmptyName,
    ZeroSeats,
    EmptyPatch,
}

impl LicenseTypeValidationError {
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::ZeroSeats => "maxUsers",
            Self::EmptyPatch => "body",
        }
    }
}

impl fmt::Display for LicenseTypeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "license type name must not be empty"),
            Self::ZeroSeats => write!(f, "maxUsers must be at least 1 when present"),
            Self::EmptyPatch => write!(f, "update must change at least one field"),
        }
    }
}

impl std::error::Error for LicenseTypeValidationError {}

/// Pricing variant of a product.
///
/// `max_users` of `None` means the seat count is unlimited.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LicenseType {
    #[schema(value_type = u32, example = 2)]
    pub id: LicenseTypeId,
    #[schema(value_type = u32, example = 1)]
    pub product_id: ProductId,
    #[schema(example = "Team License")]
    pub name: String,
    pub description: String,
    #[schema(value_type = f64, example = 299.99)]
    pub price: Price,
    #[schema(example = 5)]
    pub max_users: Option<u32>,
}

impl LicenseType {
    /// Seat count for multi-seat licenses, `None` for single-seat or unlimited.
    ///
    /// # Examples
    /// ```
    /// # use storefront::domain::{LicenseType, LicenseTypeId, Price, ProductId};
    /// let mut team = LicenseType {
    ///     id: LicenseTypeId::new(2),
    ///     product_id: ProductId::new(1),
    ///     name: "Team License".into(),
    ///     description: String::new(),
    ///     price: Price::ZERO,
    ///     max_users: Some(5),
    /// };
    /// assert_eq!(team.team_seats(), Some(5));
    /// team.max_users = Some(1);
    /// assert_eq!(team.team_seats(), None);
    /// ```
    pub fn team_seats(&self) -> Option<u32> {
        self.max_users.filter(|seats| *seats > 1)
    }
}

/// Input for creating a license type.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLicenseType {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub max_users: Option<u32>,
}

impl NewLicenseType {
    pub fn validate(&self) -> Result<(), LicenseTypeValidationError> {
        if self.name.trim().is_empty() {
            return Err(LicenseTypeValidationError::EmptyName);
        }
        if self.max_users == Some(0) {
            return Err(LicenseTypeValidationError::ZeroSeats);
        }
        Ok(())
    }

    pub fn into_license_type(self, id: LicenseTypeId) -> LicenseType {
        LicenseType {
            id,
            product_id: self.product_id,
            name: self.name,
            description: self.description,
            price: self.price,
            max_users: self.max_users,
        }
    }
}

/// Updatable license type fields.
///
/// `max_users` distinguishes "leave alone" (`None`) from "set to unlimited"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseTypePatch {
    pub product_id: Option<ProductId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub max_users: Option<Option<u32>>,
}

impl LicenseTypePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<(), LicenseTypeValidationError> {
        if self.is_empty() {
            return Err(LicenseTypeValidationError::EmptyPatch);
        }
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(LicenseTypeValidationError::EmptyName);
        }
        if self.max_users == Some(Some(0)) {
            return Err(LicenseTypeValidationError::ZeroSeats);
        }
        Ok(())
    }

    pub fn apply(self, license_type: &mut LicenseType) {
        if let Some(product_id) = self.product_id {
            license_type.product_id = product_id;
        }
        if let Some(name) = self.name {
            license_type.name = name;
        }
        if let Some(description) = self.description {
            license_type.description = description;
        }
        if let Some(price) = self.price {
            license_type.price = price;
        }
        if let Some(max_users) = self.max_users {
            license_type.max_users = max_users;
        }
    }
}
