//! Numeric record identifiers.
//!
//! Every table in the store hands out its own monotonically increasing
//! sequence starting at 1. Identifiers are wrapped in distinct newtypes so a
//! product id cannot be passed where a license type id is expected; on the
//! wire they serialise as bare numbers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Raw numeric value.
            #[must_use]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user.
    UserId
);
define_id!(
    /// Identifier of a catalogue product.
    ProductId
);
define_id!(
    /// Identifier of a license type (pricing or seat variant of a product).
    LicenseTypeId
);
define_id!(
    /// Identifier of an issued license.
    LicenseId
);
define_id!(
    /// Identifier of a placed order.
    OrderId
);
define_id!(
    /// Identifier of an order line item.
    OrderItemId
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ids_serialise_as_bare_numbers() {
        let json = serde_json::to_string(&ProductId::new(7)).expect("serialise id");
        assert_eq!(json, "7");
        let parsed: LicenseTypeId = serde_json::from_str("12").expect("deserialise id");
        assert_eq!(parsed.get(), 12);
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case("42", Some(42))]
    #[case("-1", None)]
    #[case("abc", None)]
    fn ids_parse_from_path_segments(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(raw.parse::<UserId>().ok().map(UserId::get), expected);
    }
}
