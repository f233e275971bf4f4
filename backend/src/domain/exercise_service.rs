//! Exercise domain services.
//!
//! [`ExerciseService`] implements the exercise write and log read driving
//! ports. Every operation resolves the user first so unknown ids surface as
//! `not_found` before anything is written.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::error;

use crate::domain::ports::{
    AddExerciseRequest, AddExerciseResponse, ExerciseCommand, ExerciseLogQuery,
    ExerciseLogRequest, ExerciseRepository, ExerciseRepositoryError, UserRepository,
};
use crate::domain::user_service::map_user_persistence_error;
use crate::domain::{Error, Exercise, ExerciseDate, ExerciseLog, User, UserId};

fn map_repository_error(error: ExerciseRepositoryError) -> Error {
    match error {
        ExerciseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("exercise repository unavailable: {message}"))
        }
        ExerciseRepositoryError::Query { message } => {
            error!(%message, "exercise repository query failed");
            Error::internal(format!("exercise repository error: {message}"))
        }
    }
}

/// Message used when a user id does not resolve to a stored user.
pub fn user_not_found_message(user_id: impl std::fmt::Display) -> String {
    format!("User with id {user_id} not found")
}

/// Exercise service implementing [`ExerciseCommand`] and [`ExerciseLogQuery`].
#[derive(Clone)]
pub struct ExerciseService<U, E> {
    user_repo: Arc<U>,
    exercise_repo: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<U, E> ExerciseService<U, E> {
    /// Create a new service; `clock` supplies the default exercise date.
    pub fn new(user_repo: Arc<U>, exercise_repo: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repo,
            exercise_repo,
            clock,
        }
    }

    fn today(&self) -> ExerciseDate {
        ExerciseDate::new(self.clock.utc().date_naive())
    }
}

impl<U, E> ExerciseService<U, E>
where
    U: UserRepository,
{
    async fn require_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(user_not_found_message(user_id)))
    }
}

#[async_trait]
impl<U, E> ExerciseCommand for ExerciseService<U, E>
where
    U: UserRepository,
    E: ExerciseRepository,
{
    async fn add_exercise(
        &self,
        request: AddExerciseRequest,
    ) -> Result<AddExerciseResponse, Error> {
        let AddExerciseRequest { user_id, draft } = request;
        let user = self.require_user(&user_id).await?;

        let exercise = Exercise::from_draft(user.id().clone(), draft, self.today());
        self.exercise_repo
            .insert(&exercise)
            .await
            .map_err(map_repository_error)?;

        Ok(AddExerciseResponse { user, exercise })
    }
}

#[async_trait]
impl<U, E> ExerciseLogQuery for ExerciseService<U, E>
where
    U: UserRepository,
    E: ExerciseRepository,
{
    async fn exercise_log(&self, request: ExerciseLogRequest) -> Result<ExerciseLog, Error> {
        let ExerciseLogRequest { user_id, filter } = request;
        let user = self.require_user(&user_id).await?;

        let entries = self
            .exercise_repo
            .list_for_user(user.id(), &filter)
            .await
            .map_err(map_repository_error)?;

        Ok(ExerciseLog::new(user, entries))
    }
}

#[cfg(test)]
#[path = "exercise_service_tests.rs"]
mod tests;
