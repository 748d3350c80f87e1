//! License key formatting and generation.
//!
//! A key is five dash-separated groups:
//!
//! ```text
//! DEVE-TEAM5-1A2B3C4D-5E6F7A8B-9C0D1E2F
//! ^^^^ ^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^
//! |    |     three random 4-byte segments, upper-case hex
//! |    seat prefix: TEAM<N> for multi-seat types, XXXX otherwise
//! first four characters of the product name, upper-cased (upper-casing may
//! lengthen it, e.g. "Maße" becomes "MASSE")
//! ```
//!
//! Uniqueness is probabilistic. Generated keys are never checked against
//! previously issued ones.

use std::fmt;
use std::sync::{Arc, OnceLock};

use rand::RngCore;
use rand::rngs::OsRng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{Error, LicenseType, LicenseTypeId, Product, ProductId};

/// Number of characters taken from the product name.
const PRODUCT_PREFIX_LEN: usize = 4;
/// Seat prefix used for single-seat and unlimited license types.
const SEAT_PLACEHOLDER: &str = "XXXX";
const RANDOM_SEGMENTS: usize = 3;
const SEGMENT_BYTES: usize = 4;

static KEY_RE: OnceLock<Regex> = OnceLock::new();

// Upper-casing maps one character to at most three, so the product prefix
// spans up to twelve.
fn key_regex() -> &'static Regex {
    KEY_RE.get_or_init(|| {
        Regex::new(r"^.{1,12}-(?:TEAM[0-9]+|XXXX)-[0-9A-F]{8}-[0-9A-F]{8}-[0-9A-F]{8}$")
            .unwrap_or_else(|error| panic!("license key regex failed to compile: {error}"))
    })
}

/// Error returned when parsing a key from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseKeyFormatError;

impl fmt::Display for LicenseKeyFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "license key is not in the issued format")
    }
}

impl std::error::Error for LicenseKeyFormatError {}

/// An issued license key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseKey(String);

impl LicenseKey {
    /// Parse a key supplied by a caller, e.g. a lookup path segment.
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::LicenseKey;
    ///
    /// assert!(LicenseKey::parse("DEVE-XXXX-0A1B2C3D-4E5F6A7B-8C9D0E1F").is_ok());
    /// assert!(LicenseKey::parse("DEVE-XXXX-0a1b2c3d-4E5F6A7B-8C9D0E1F").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, LicenseKeyFormatError> {
        if key_regex().is_match(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(LicenseKeyFormatError)
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LicenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Format a fresh key for `product` and `license_type`, drawing the random
/// segments from `rng`.
pub fn format_license_key<R>(
    product: &Product,
    license_type: &LicenseType,
    rng: &mut R,
) -> LicenseKey
where
    R: RngCore + ?Sized,
{
    let product_prefix: String = product
        .name
        .chars()
        .take(PRODUCT_PREFIX_LEN)
        .collect::<String>()
        .to_uppercase();
    let seat_prefix = license_type
        .team_seats()
        .map_or_else(|| SEAT_PLACEHOLDER.to_owned(), |seats| format!("TEAM{seats}"));

    let mut groups = Vec::with_capacity(2 + RANDOM_SEGMENTS);
    groups.push(product_prefix);
    groups.push(seat_prefix);
    for _ in 0..RANDOM_SEGMENTS {
        let mut bytes = [0_u8; SEGMENT_BYTES];
        rng.fill_bytes(&mut bytes);
        groups.push(hex::encode_upper(bytes));
    }
    LicenseKey(groups.join("-"))
}

/// Generates keys for stored catalogue records using OS randomness.
#[derive(Clone)]
pub struct LicenseKeyGenerator<C> {
    catalogue: Arc<C>,
}

impl<C> LicenseKeyGenerator<C> {
    pub fn new(catalogue: Arc<C>) -> Self {
        Self { catalogue }
    }
}

impl<C> LicenseKeyGenerator<C>
where
    C: CatalogueRepository,
{
    /// Look up both records and format a key for them.
    ///
    /// Fails with `not_found` naming whichever id is missing.
    pub async fn generate(
        &self,
        product_id: ProductId,
        license_type_id: LicenseTypeId,
    ) -> Result<LicenseKey, Error> {
        let product = self
            .catalogue
            .find_product(product_id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found(format!("product {product_id} not found")))?;
        let license_type = self
            .catalogue
            .find_license_type(license_type_id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| {
                Error::not_found(format!("license type {license_type_id} not found"))
            })?;
        Ok(format_license_key(&product, &license_type, &mut OsRng))
    }
}

fn map_catalogue_error(error: CatalogueRepositoryError) -> Error {
    Error::internal(format!("catalogue lookup failed: {error}"))
}
