//! Product categories.
//!
//! Two notions coexist and are deliberately kept apart: the admin-managed
//! category set, and the set derived from the `category` field of stored
//! products. Neither updates the other. `GET /admin/categories` lists the
//! admin set and `GET /categories` lists the derived set; both serialise as
//! bare name strings.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCategoryName;

impl fmt::Display for EmptyCategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "category name must not be empty")
    }
}

impl std::error::Error for EmptyCategoryName {}

/// A category name, compared case-sensitively. Admin-created names are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(example = "Security Tools")]
pub struct Category(String);

impl Category {
    pub fn new(name: &str) -> Result<Self, EmptyCategoryName> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EmptyCategoryName);
        }
        Ok(Self(name.to_owned()))
    }

    /// Wrap a stored product's category field without trimming, so the name
    /// still matches the exact category filter. Blank fields yield `None`.
    pub(crate) fn verbatim(name: &str) -> Option<Self> {
        (!name.trim().is_empty()).then(|| Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
