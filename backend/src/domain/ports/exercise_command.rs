//! Driving port for logging exercises.

use async_trait::async_trait;

use crate::domain::{Error, Exercise, ExerciseDraft, User, UserId};

/// Request to log an exercise for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddExerciseRequest {
    pub user_id: UserId,
    pub draft: ExerciseDraft,
}

/// Stored exercise together with the owning user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddExerciseResponse {
    pub user: User,
    pub exercise: Exercise,
}

/// Driving port for exercise write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseCommand: Send + Sync {
    /// Store an exercise for an existing user.
    ///
    /// Unknown users yield `not_found` and nothing is stored. A draft without
    /// a date is stored under the current UTC day.
    async fn add_exercise(&self, request: AddExerciseRequest)
    -> Result<AddExerciseResponse, Error>;
}
