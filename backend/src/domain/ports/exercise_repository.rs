//! Port for exercise persistence and filtered log reads.

use async_trait::async_trait;

use crate::domain::{Exercise, ExerciseLogFilter, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by exercise repository adapters.
    pub enum ExerciseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "exercise repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "exercise repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Persist a new exercise.
    async fn insert(&self, exercise: &Exercise) -> Result<(), ExerciseRepositoryError>;

    /// Exercises recorded for `user_id` in insertion order, with the date
    /// window and limit of `filter` applied.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &ExerciseLogFilter,
    ) -> Result<Vec<Exercise>, ExerciseRepositoryError>;
}
