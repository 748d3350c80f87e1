//! `UserRepository` over the in-memory store.

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::memory_store::MemoryStore;

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let created_at = self.now();
        let mut tables = self.tables().write();
        if tables.users.values().any(|existing| existing.has_email(user.email())) {
            return Err(UserPersistenceError::duplicate_email());
        }
        if tables
            .users
            .values()
            .any(|existing| existing.has_username(user.username()))
        {
            return Err(UserPersistenceError::duplicate_username());
        }
        let id = UserId::new(
            tables
                .sequences
                .users
                .advance()
                .map_err(|err| UserPersistenceError::query(err.to_string()))?,
        );
        let user = user.into_user(id, created_at);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.tables().read().users.get(&id).cloned())
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.tables().read();
        Ok(tables
            .users
            .values()
            .find(|user| user.has_username(username))
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.tables().read().users.values().cloned().collect())
    }
}
