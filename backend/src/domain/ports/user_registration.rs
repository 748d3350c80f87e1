//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User};

#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create an account.
    ///
    /// Fails with `conflict` when the email or the username is already in
    /// use; the email is checked first.
    async fn register(&self, user: NewUser) -> Result<User, Error>;
}
