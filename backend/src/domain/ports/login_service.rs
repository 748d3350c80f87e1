//! Driving port for login.
//!
//! Inbound adapters call this port to authenticate credentials without
//! knowing how users are stored.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the matching user, or `unauthorized` when the username is
    /// unknown or the password differs.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
