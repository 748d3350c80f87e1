//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{Error, LicenseKey, Price};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidLicenseKey,
    InvalidPrice,
    InvalidBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidLicenseKey => "invalid_license_key",
            ErrorCode::InvalidPrice => "invalid_price",
            ErrorCode::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

/// Parse a numeric path identifier, failing with `message` when it is not a
/// valid id.
///
/// # Examples
/// ```ignore
/// let id: ProductId = parse_id("7", FieldName::new("id"), "Invalid product ID")?;
/// ```
pub(crate) fn parse_id<T: FromStr>(
    raw: &str,
    field: FieldName,
    message: &'static str,
) -> Result<T, Error> {
    raw.parse().map_err(|_| {
        ValidationError::new(field.as_str(), message).with_value(ErrorCode::InvalidId, raw)
    })
}

pub(crate) fn parse_license_key(raw: &str, field: FieldName) -> Result<LicenseKey, Error> {
    LicenseKey::parse(raw).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string())
            .with_value(ErrorCode::InvalidLicenseKey, raw)
    })
}

pub(crate) fn parse_price(value: f64, field: FieldName) -> Result<Price, Error> {
    Price::new(value).map_err(|err| {
        ValidationError::new(field.as_str(), format!("{}: {err}", field.as_str()))
            .with_value(ErrorCode::InvalidPrice, value.to_string())
    })
}

/// Error returned for request bodies that cannot be decoded.
pub(crate) fn invalid_body_error(reason: &str) -> Error {
    Error::invalid_request("Invalid request body").with_details(json!({
        "reason": reason,
        "code": ErrorCode::InvalidBody.as_str(),
    }))
}
