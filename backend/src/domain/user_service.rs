//! User domain service.
//!
//! Implements the user registration and listing driving ports over a
//! [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::error;

use crate::domain::ports::{
    CreateUserRequest, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{Error, User};

/// Message returned when a username is already registered.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "Username already exists";

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::invalid_request(DUPLICATE_USERNAME_MESSAGE).with_details(json!({
                "field": "username",
                "code": "duplicate_username",
            }))
        }
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service with the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let user = User::register(request.username);
        self.user_repo
            .insert(&user)
            .await
            .map_err(map_user_persistence_error)?;
        Ok(user)
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo
            .list()
            .await
            .map_err(map_user_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::{ErrorCode, Username};
    use rstest::rstest;

    fn request(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: Username::new(username).expect("valid username"),
        }
    }

    #[tokio::test]
    async fn create_user_persists_and_returns_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .withf(|user| user.username().as_ref() == "ada")
            .times(1)
            .return_once(|_| Ok(()));

        let service = UserService::new(Arc::new(repo));
        let user = service
            .create_user(request("ada"))
            .await
            .expect("user created");

        assert_eq!(user.username().as_ref(), "ada");
    }

    #[tokio::test]
    async fn create_user_reports_duplicate_username_as_invalid_request() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .return_once(|_| Err(UserPersistenceError::duplicate_username("ada")));

        let service = UserService::new(Arc::new(repo));
        let err = service
            .create_user(request("ada"))
            .await
            .expect_err("duplicate rejected");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), DUPLICATE_USERNAME_MESSAGE);
        let details = err.details().expect("details present");
        assert_eq!(details["code"], "duplicate_username");
        assert_eq!(details["field"], "username");
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn list_users_maps_repository_errors(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_list().return_once(move || Err(failure));

        let service = UserService::new(Arc::new(repo));
        let err = service.list_users().await.expect_err("list fails");

        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn list_users_returns_repository_order() {
        let first = User::register(Username::new("alice").expect("username"));
        let second = User::register(Username::new("bob").expect("username"));
        let stored = vec![first.clone(), second.clone()];

        let mut repo = MockUserRepository::new();
        repo.expect_list().return_once(move || Ok(stored));

        let service = UserService::new(Arc::new(repo));
        let users = service.list_users().await.expect("users listed");

        assert_eq!(users, vec![first, second]);
    }
}
