//! Driving port for user registration.

use async_trait::async_trait;

use crate::domain::{Error, User, Username};

/// Request to register a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub username: Username,
}

/// Driving port for user write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a user under a fresh identifier.
    ///
    /// A taken username yields an `invalid_request` error whose details carry
    /// `{"field": "username", "code": "duplicate_username"}`.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;
}
