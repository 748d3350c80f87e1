//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// One user, or `not_found`.
    async fn user(&self, id: UserId) -> Result<User, Error>;

    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
