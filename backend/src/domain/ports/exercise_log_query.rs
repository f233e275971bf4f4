//! Driving port for reading a user's exercise log.

use async_trait::async_trait;

use crate::domain::{Error, ExerciseLog, ExerciseLogFilter, UserId};

/// Request for a user's filtered log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLogRequest {
    pub user_id: UserId,
    pub filter: ExerciseLogFilter,
}

/// Driving port for exercise log reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseLogQuery: Send + Sync {
    /// Return the user's exercises in insertion order, filtered and limited.
    async fn exercise_log(&self, request: ExerciseLogRequest) -> Result<ExerciseLog, Error>;
}
