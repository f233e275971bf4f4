//! In-process repositories backed by mutex-guarded vectors.
//!
//! Vector position is the insertion order, so exercises come back in the
//! same natural order the PostgreSQL adapter derives from its identity
//! column. State is lost when the process exits.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ExerciseRepository, ExerciseRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{Exercise, ExerciseLogFilter, User, UserId};

fn lock<T, E>(
    mutex: &Mutex<T>,
    poisoned: impl FnOnce(&'static str) -> E,
) -> Result<MutexGuard<'_, T>, E> {
    mutex.lock().map_err(|_| poisoned("in-memory store lock poisoned"))
}

/// User repository kept in process memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = lock(&self.users, UserPersistenceError::query)?;
        // Check and insert under the same guard.
        if users
            .iter()
            .any(|existing| existing.username() == user.username())
        {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = lock(&self.users, UserPersistenceError::query)?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let users = lock(&self.users, UserPersistenceError::query)?;
        Ok(users.clone())
    }
}

/// Exercise repository kept in process memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryExerciseRepository {
    exercises: Arc<Mutex<Vec<Exercise>>>,
}

impl InMemoryExerciseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored exercises across all users.
    pub fn len(&self) -> usize {
        self.exercises.lock().map_or(0, |exercises| exercises.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryExerciseRepository {
    async fn insert(&self, exercise: &Exercise) -> Result<(), ExerciseRepositoryError> {
        let mut exercises = lock(&self.exercises, ExerciseRepositoryError::query)?;
        exercises.push(exercise.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &ExerciseLogFilter,
    ) -> Result<Vec<Exercise>, ExerciseRepositoryError> {
        let exercises = lock(&self.exercises, ExerciseRepositoryError::query)?;
        let owned = exercises
            .iter()
            .filter(|exercise| exercise.user_id() == user_id)
            .cloned();
        Ok(filter.apply(owned))
    }
}
