//! User accounts.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::UserId;

/// Validation errors returned by [`NewUser::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    EmptyPassword,
    EmptyEmail,
    InvalidEmail,
}

impl UserValidationError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
            Self::EmptyEmail | Self::InvalidEmail => "email",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Registration input accepted by the store.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `email` is trimmed and shaped like `local@domain`.
/// - `password` is non-empty; surrounding whitespace is preserved.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    username: String,
    email: String,
    password: Zeroizing<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub is_admin: bool,
}

impl NewUser {
    /// Validate the required registration fields.
    ///
    /// Optional profile fields start empty and `is_admin` starts false.
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::NewUser;
    ///
    /// let user = NewUser::try_new(" ada ", "ada@example.com", "hunter2").unwrap();
    /// assert_eq!(user.username(), "ada");
    /// assert!(!user.is_admin);
    /// ```
    pub fn try_new(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, UserValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(email) {
            return Err(UserValidationError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            first_name: None,
            last_name: None,
            company: None,
            is_admin: false,
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Materialise the stored record.
    pub fn into_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            company: self.company,
            is_admin: self.is_admin,
            created_at,
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("is_admin", &self.is_admin)
            .finish_non_exhaustive()
    }
}

/// Registered user.
///
/// The password is compared in plaintext on login and is never serialised.
#[derive(Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = u32, example = 2)]
    pub id: UserId,
    #[schema(example = "user")]
    pub username: String,
    #[schema(example = "user@example.com")]
    pub email: String,
    #[serde(skip)]
    password: Zeroizing<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub is_admin: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Compare a candidate password with the stored one.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.as_str() == candidate
    }

    /// Case-insensitive username comparison used for lookups.
    pub fn has_username(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase()
    }

    /// Case-insensitive email comparison used for lookups.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("is_admin", &self.is_admin)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
