//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed storefront entities used by the API
//! and persistence layers, plus the services that drive them through the
//! ports in [`ports`]. Types document their invariants and serialisation
//! contracts (serde) in their own Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Identifier newtypes ([`UserId`], [`ProductId`], ...).
//! - Catalogue entities: [`Product`], [`LicenseType`], [`Category`].
//! - Sales entities: [`Order`], [`OrderItem`], [`License`], [`Cart`].
//! - Services: [`CatalogueService`], [`AccountService`],
//!   [`LicenseQueryService`], [`OrderFulfilmentService`].

use std::fmt;

use serde_json::json;

pub mod account_service;
pub mod auth;
pub mod cart;
pub mod catalogue_service;
pub mod category;
pub mod error;
pub mod ids;
pub mod license;
pub mod license_key;
pub mod license_query_service;
pub mod license_type;
pub mod order;
pub mod order_fulfilment;
pub mod ports;
pub mod price;
pub mod product;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::cart::{Cart, CartItem, CartQuote, TAX_RATE};
pub use self::catalogue_service::CatalogueService;
pub use self::category::{Category, EmptyCategoryName};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{LicenseId, LicenseTypeId, OrderId, OrderItemId, ProductId, UserId};
pub use self::license::{
    EXPIRY_WARNING_DAYS, LICENSE_TERM, License, LicenseDetails, NewLicense, expiry_for,
};
pub use self::license_key::{
    LicenseKey, LicenseKeyFormatError, LicenseKeyGenerator, format_license_key,
};
pub use self::license_query_service::LicenseQueryService;
pub use self::license_type::{
    DEFAULT_MAX_USERS, LicenseType, LicenseTypePatch, LicenseTypeValidationError, NewLicenseType,
};
pub use self::order::{
    DEFAULT_ORDER_STATUS, LineSelection, NewOrder, NewOrderItem, Order, OrderDetails, OrderItem,
    OrderItemDetails, OrderPlacement, OrderStatus, OrderValidationError, PlacedOrder,
};
pub use self::order_fulfilment::OrderFulfilmentService;
pub use self::price::{Price, PriceValidationError};
pub use self::product::{NewProduct, Product, ProductPatch, ProductValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserValidationError};

/// Build an `invalid_request` error for a single offending field.
pub(crate) fn validation_error(field: impl Into<String>, message: &impl fmt::Display) -> Error {
    Error::invalid_request(message.to_string()).with_details(json!({
        "field": field.into(),
        "code": "validation_failed",
    }))
}
