//! Account domain service: registration, login, and user reads.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    LoginService, UserPersistenceError, UserRegistration, UserRepository, UsersQuery,
};
use crate::domain::{Error, LoginCredentials, NewUser, User, UserId};

#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail => duplicate("email", "Email already in use"),
        UserPersistenceError::DuplicateUsername => {
            duplicate("username", "Username already taken")
        }
    }
}

fn duplicate(field: &str, message: &str) -> Error {
    Error::conflict(message).with_details(json!({
        "field": field,
        "code": "duplicate",
    }))
}

#[async_trait]
impl<U> UserRegistration for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, user: NewUser) -> Result<User, Error> {
        let created = self.users.create_user(user).await.map_err(|err| {
            warn!(error = %err, "registration rejected");
            map_user_error(err)
        })?;
        info!(user_id = %created.id, username = %created.username, "user registered");
        Ok(created)
    }
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self
            .users
            .find_user_by_username(credentials.username())
            .await
            .map_err(map_user_error)?;
        match user {
            Some(user) if user.password_matches(credentials.password()) => {
                info!(user_id = %user.id, "login succeeded");
                Ok(user)
            }
            _ => {
                warn!(username = %credentials.username(), "login rejected");
                Err(Error::unauthorized("Invalid username or password"))
            }
        }
    }
}

#[async_trait]
impl<U> UsersQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_user(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list_users().await.map_err(map_user_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registration() -> NewUser {
        NewUser::try_new("newbie", "newbie@example.com", "pw").expect("valid registration")
    }

    fn existing(username: &str, email: &str, password: &str) -> User {
        NewUser::try_new(username, email, password)
            .expect("valid user")
            .into_user(UserId::new(2), Utc::now())
    }

    #[rstest]
    #[case::email(
        UserPersistenceError::DuplicateEmail,
        "email",
        "Email already in use"
    )]
    #[case::username(
        UserPersistenceError::DuplicateUsername,
        "username",
        "Username already taken"
    )]
    #[tokio::test]
    async fn register_reports_taken_identity_as_conflict(
        registration: NewUser,
        #[case] failure: UserPersistenceError,
        #[case] field: &str,
        #[case] message: &str,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_user_by_username().never();
        repo.expect_create_user()
            .times(1)
            .return_once(move |_| Err(failure));

        let err = AccountService::new(Arc::new(repo))
            .register(registration)
            .await
            .expect_err("duplicate identity");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), message);
        assert_eq!(err.details().and_then(|d| d.get("field")), Some(&json!(field)));
    }

    #[rstest]
    #[tokio::test]
    async fn register_creates_new_accounts(registration: NewUser) {
        let mut repo = MockUserRepository::new();
        repo.expect_create_user()
            .times(1)
            .return_once(|user| Ok(user.into_user(UserId::new(3), Utc::now())));

        let user = AccountService::new(Arc::new(repo))
            .register(registration)
            .await
            .expect("registered");
        assert_eq!(user.id, UserId::new(3));
        assert_eq!(user.username, "newbie");
    }

    #[rstest]
    #[case("user123", true)]
    #[case("wrong", false)]
    #[tokio::test]
    async fn authenticate_compares_passwords(#[case] password: &str, #[case] succeeds: bool) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_user_by_username()
            .times(1)
            .return_once(|_| Ok(Some(existing("user", "user@example.com", "user123"))));

        let creds = LoginCredentials::try_from_parts("user", password).expect("credentials");
        let result = AccountService::new(Arc::new(repo)).authenticate(&creds).await;
        match (succeeds, result) {
            (true, Ok(user)) => assert_eq!(user.username, "user"),
            (false, Err(err)) => {
                assert_eq!(err.code(), ErrorCode::Unauthorized);
                assert_eq!(err.message(), "Invalid username or password");
            }
            (expected, other) => panic!("expected success={expected}, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn authenticate_rejects_unknown_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_user_by_username()
            .times(1)
            .return_once(|_| Ok(None));

        let creds = LoginCredentials::try_from_parts("ghost", "pw").expect("credentials");
        let err = AccountService::new(Arc::new(repo))
            .authenticate(&creds)
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
