//! Issued licenses and the helpers customers see around them.

use chrono::{DateTime, Months, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    LicenseId, LicenseKey, LicenseType, LicenseTypeId, Product, ProductId, UserId,
};

/// Licenses are valid for twelve calendar months from issuance.
pub const LICENSE_TERM: Months = Months::new(12);

/// Window before expiry in which a license counts as "about to expire".
pub const EXPIRY_WARNING_DAYS: i64 = 30;

const ACTIVATION_INSTRUCTIONS: [&str; 4] = [
    "Download the software from your account or using the download link in your confirmation email.",
    "Install the software on your computer.",
    "When prompted, enter the license key exactly as shown above.",
    "Your software will validate the license key and activate your product.",
];

/// Expiry for a license issued at `issued_at`.
///
/// Same month and day one year later; February 29 clamps to February 28.
/// Returns `None` only when the result would leave chrono's date range.
pub fn expiry_for(issued_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    issued_at.checked_add_months(LICENSE_TERM)
}

/// A license held by a user for one product and license type.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct License {
    #[schema(value_type = u32)]
    pub id: LicenseId,
    #[schema(value_type = u32)]
    pub user_id: UserId,
    #[schema(value_type = u32)]
    pub product_id: ProductId,
    #[schema(value_type = u32)]
    pub license_type_id: LicenseTypeId,
    #[schema(value_type = String, example = "DEVE-XXXX-0A1B2C3D-4E5F6A7B-8C9D0E1F")]
    pub license_key: LicenseKey,
    pub is_active: bool,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expires_at: Option<DateTime<Utc>>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl License {
    /// Whole days from `now` until expiry, comparing calendar dates.
    ///
    /// Negative once the license has expired; `None` for perpetual licenses.
    pub fn days_until_expiration(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at
            .map(|expires_at| (expires_at.date_naive() - now.date_naive()).num_days())
    }

    /// True when expiry is in the future but no more than
    /// [`EXPIRY_WARNING_DAYS`] away.
    pub fn is_about_to_expire(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            expires_at > now && expires_at <= now + chrono::Duration::days(EXPIRY_WARNING_DAYS)
        })
    }
}

/// Input for recording a license.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLicense {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub license_type_id: LicenseTypeId,
    pub license_key: LicenseKey,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewLicense {
    pub fn into_license(self, id: LicenseId, created_at: DateTime<Utc>) -> License {
        License {
            id,
            user_id: self.user_id,
            product_id: self.product_id,
            license_type_id: self.license_type_id,
            license_key: self.license_key,
            is_active: self.is_active,
            expires_at: self.expires_at,
            created_at,
        }
    }
}

/// A license joined with its product and license type.
///
/// Either side is `None` when the referenced record has since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LicenseDetails {
    #[serde(flatten)]
    pub license: License,
    pub product: Option<Product>,
    pub license_type: Option<LicenseType>,
}

impl LicenseDetails {
    /// Plain-text license file offered for download.
    ///
    /// # Examples
    /// ```
    /// # use storefront::domain::{LicenseDetails, License, LicenseId, LicenseKey,
    /// #     LicenseTypeId, ProductId, UserId};
    /// # use chrono::{TimeZone, Utc};
    /// # let license = License {
    /// #     id: LicenseId::new(1),
    /// #     user_id: UserId::new(2),
    /// #     product_id: ProductId::new(1),
    /// #     license_type_id: LicenseTypeId::new(1),
    /// #     license_key: LicenseKey::parse("DEVE-XXXX-0A1B2C3D-4E5F6A7B-8C9D0E1F").unwrap(),
    /// #     is_active: true,
    /// #     expires_at: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).single(),
    /// #     created_at: Utc::now(),
    /// # };
    /// let details = LicenseDetails { license, product: None, license_type: None };
    /// let file = details.license_file();
    /// assert!(file.starts_with("License Key: DEVE-XXXX-0A1B2C3D-4E5F6A7B-8C9D0E1F\n"));
    /// assert!(file.contains("Expires: 2026-03-01\n"));
    /// ```
    pub fn license_file(&self) -> String {
        let product = self
            .product
            .as_ref()
            .map_or("Unknown product", |product| product.name.as_str());
        let license_type = self
            .license_type
            .as_ref()
            .map_or("Unknown license type", |license_type| license_type.name.as_str());
        let expires = self.license.expires_at.map_or_else(
            || "Never".to_owned(),
            |expires_at| expires_at.format("%Y-%m-%d").to_string(),
        );

        let mut lines = vec![
            format!("License Key: {}", self.license.license_key),
            format!("Product: {product}"),
            format!("License Type: {license_type}"),
            format!("Expires: {expires}"),
            String::new(),
            "Activation Instructions:".to_owned(),
        ];
        lines.extend(
            ACTIVATION_INSTRUCTIONS
                .iter()
                .enumerate()
                .map(|(idx, step)| format!("{}. {step}", idx + 1)),
        );
        lines.join("\n")
    }

    /// Suggested download name: product name in lower snake case.
    pub fn license_file_name(&self) -> String {
        let stem = self.product.as_ref().map_or_else(
            || format!("license_{}", self.license.id),
            |product| {
                product
                    .name
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join("_")
                    .to_lowercase()
            },
        );
        format!("{stem}_license.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn license() -> License {
        License {
            id: LicenseId::new(3),
            user_id: UserId::new(2),
            product_id: ProductId::new(1),
            license_type_id: LicenseTypeId::new(1),
            license_key: LicenseKey::parse("DEVE-XXXX-0A1B2C3D-4E5F6A7B-8C9D0E1F")
                .expect("valid key"),
            is_active: true,
            expires_at: Some(at(2026, 6, 15, 12)),
            created_at: at(2025, 6, 15, 12),
        }
    }

    #[rstest]
    #[case(at(2025, 6, 15, 9), at(2026, 6, 15, 9))]
    #[case(at(2024, 2, 29, 23), at(2025, 2, 28, 23))]
    #[case(at(2025, 12, 31, 0), at(2026, 12, 31, 0))]
    fn expiry_is_one_calendar_year_later(
        #[case] issued: DateTime<Utc>,
        #[case] expected: DateTime<Utc>,
    ) {
        assert_eq!(expiry_for(issued), Some(expected));
    }

    #[rstest]
    #[case(at(2026, 6, 14, 23), Some(1))]
    #[case(at(2026, 6, 15, 0), Some(0))]
    #[case(at(2026, 5, 16, 18), Some(30))]
    #[case(at(2026, 6, 20, 0), Some(-5))]
    fn days_until_expiration_counts_calendar_days(
        license: License,
        #[case] now: DateTime<Utc>,
        #[case] expected: Option<i64>,
    ) {
        assert_eq!(license.days_until_expiration(now), expected);
    }

    #[rstest]
    #[case(at(2026, 5, 16, 12), true)]
    #[case(at(2026, 5, 16, 11), false)]
    #[case(at(2026, 6, 15, 11), true)]
    #[case(at(2026, 6, 15, 12), false)]
    #[case(at(2025, 7, 1, 0), false)]
    fn about_to_expire_within_thirty_days(
        license: License,
        #[case] now: DateTime<Utc>,
        #[case] expected: bool,
    ) {
        assert_eq!(license.is_about_to_expire(now), expected);
    }

    #[rstest]
    fn perpetual_licenses_never_warn(mut license: License) {
        license.expires_at = None;
        assert!(!license.is_about_to_expire(at(2026, 6, 1, 0)));
        assert_eq!(license.days_until_expiration(at(2026, 6, 1, 0)), None);
    }

    #[rstest]
    fn license_file_lists_numbered_instructions(license: License) {
        let details = LicenseDetails {
            license,
            product: None,
            license_type: None,
        };
        let file = details.license_file();
        let lines: Vec<&str> = file.lines().collect();
        assert_eq!(lines[1], "Product: Unknown product");
        assert_eq!(lines[3], "Expires: 2026-06-15");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Activation Instructions:");
        assert_eq!(lines.len(), 10);
        assert!(lines[9].starts_with("4. Your software will validate"));
        assert_eq!(details.license_file_name(), "license_3_license.txt");
    }

    #[rstest]
    fn details_flatten_license_fields(license: License) {
        let details = LicenseDetails {
            license,
            product: None,
            license_type: None,
        };
        let value = serde_json::to_value(&details).expect("serialise");
        assert_eq!(value["licenseKey"], "DEVE-XXXX-0A1B2C3D-4E5F6A7B-8C9D0E1F");
        assert_eq!(value["isActive"], true);
        assert!(value["product"].is_null());
        assert!(value.get("license").is_none());
    }
}
