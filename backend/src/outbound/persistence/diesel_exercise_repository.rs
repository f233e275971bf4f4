//! PostgreSQL-backed `ExerciseRepository` implementation using Diesel ORM.
//!
//! Log filters run in SQL: the date window becomes a `WHERE` clause on
//! `exercise_date`, the limit a `LIMIT`, and rows come back ordered by the
//! identity `sequence` column.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ExerciseRepository, ExerciseRepositoryError};
use crate::domain::{
    Description, DurationMinutes, Exercise, ExerciseDate, ExerciseId, ExerciseLogFilter, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ExerciseRow, NewExerciseRow};
use super::pool::{DbPool, PoolError};
use super::schema::exercises;

/// Diesel-backed implementation of the exercise repository port.
#[derive(Clone)]
pub struct DieselExerciseRepository {
    pool: DbPool,
}

impl DieselExerciseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExerciseRepositoryError {
    map_basic_pool_error(error, ExerciseRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ExerciseRepositoryError {
    map_basic_diesel_error(
        error,
        ExerciseRepositoryError::query,
        ExerciseRepositoryError::connection,
    )
}

fn row_to_exercise(row: ExerciseRow) -> Result<Exercise, ExerciseRepositoryError> {
    let ExerciseRow {
        id,
        user_id,
        description,
        duration_minutes,
        exercise_date,
    } = row;

    let description = Description::new(description)
        .map_err(|err| ExerciseRepositoryError::query(format!("invalid stored row: {err}")))?;
    let duration = DurationMinutes::from_i64(i64::from(duration_minutes))
        .map_err(|err| ExerciseRepositoryError::query(format!("invalid stored row: {err}")))?;

    Ok(Exercise::new(
        ExerciseId::from_uuid(id),
        UserId::from_uuid(user_id),
        description,
        duration,
        ExerciseDate::new(exercise_date),
    ))
}

fn duration_column(duration: DurationMinutes) -> Result<i32, ExerciseRepositoryError> {
    i32::try_from(duration.get())
        .map_err(|_| ExerciseRepositoryError::query("duration exceeds column range"))
}

#[async_trait]
impl ExerciseRepository for DieselExerciseRepository {
    async fn insert(&self, exercise: &Exercise) -> Result<(), ExerciseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewExerciseRow {
            id: *exercise.id().as_uuid(),
            user_id: *exercise.user_id().as_uuid(),
            description: exercise.description().as_ref(),
            duration_minutes: duration_column(exercise.duration())?,
            exercise_date: exercise.date().as_naive_date(),
        };

        diesel::insert_into(exercises::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &ExerciseLogFilter,
    ) -> Result<Vec<Exercise>, ExerciseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = exercises::table
            .filter(exercises::user_id.eq(*user_id.as_uuid()))
            .order(exercises::sequence.asc())
            .select(ExerciseRow::as_select())
            .into_boxed();

        if let Some(from) = filter.from {
            query = query.filter(exercises::exercise_date.ge(from.as_naive_date()));
        }
        if let Some(to) = filter.to {
            query = query.filter(exercises::exercise_date.le(to.as_naive_date()));
        }
        if let Some(limit) = filter.limit {
            query = query.limit(i64::try_from(limit.get()).unwrap_or(i64::MAX));
        }

        let rows: Vec<ExerciseRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_exercise).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(duration_minutes: i32) -> ExerciseRow {
        ExerciseRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            description: "row".to_owned(),
            duration_minutes,
            exercise_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        }
    }

    #[rstest]
    fn row_conversion_renders_stored_date() {
        let exercise = row_to_exercise(row(45)).expect("valid row");
        assert_eq!(exercise.duration().get(), 45);
        assert_eq!(exercise.date().to_string(), "Mon Jan 01 2024");
    }

    #[rstest]
    #[case(0)]
    #[case(-10)]
    fn row_conversion_rejects_invalid_durations(#[case] minutes: i32) {
        let err = row_to_exercise(row(minutes)).expect_err("invalid duration rejected");
        assert!(matches!(err, ExerciseRepositoryError::Query { .. }));
    }
}
