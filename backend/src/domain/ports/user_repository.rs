//! Driven port for user account storage.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email, compared case-insensitively.
        DuplicateEmail => "email already in use",
        /// Another account already uses the username, compared case-insensitively.
        DuplicateUsername => "username already taken",
    }
}

/// User storage. Usernames and emails are unique.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert `user` unless its email or username is taken. Email is checked
    /// first. The check and the insert are atomic.
    async fn create_user(&self, user: NewUser) -> Result<User, UserPersistenceError>;

    async fn find_user(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Case-insensitive username lookup.
    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    async fn list_users(&self) -> Result<Vec<User>, UserPersistenceError>;
}
