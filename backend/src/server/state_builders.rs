//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;
use tracing::warn;

use exercise_tracker::domain::ports::{ExerciseRepository, UserRepository};
use exercise_tracker::domain::{ExerciseService, UserService};
use exercise_tracker::inbound::http::state::{HttpState, HttpStatePorts};
use exercise_tracker::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};
use exercise_tracker::outbound::persistence::{
    DbPool, DieselExerciseRepository, DieselUserRepository,
};

/// Build the HTTP state over PostgreSQL when a pool is available, otherwise
/// over the in-memory store.
pub fn build_http_state(db_pool: Option<&DbPool>, clock: Arc<dyn Clock>) -> web::Data<HttpState> {
    match db_pool {
        Some(pool) => state_from_repositories(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselExerciseRepository::new(pool.clone())),
            clock,
        ),
        None => {
            warn!("no database configured; data is kept in memory and lost on restart");
            state_from_repositories(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryExerciseRepository::new()),
                clock,
            )
        }
    }
}

/// Wrap a repository pair in services and expose them as driving ports.
pub fn state_from_repositories<U, E>(
    users: Arc<U>,
    exercises: Arc<E>,
    clock: Arc<dyn Clock>,
) -> web::Data<HttpState>
where
    U: UserRepository + 'static,
    E: ExerciseRepository + 'static,
{
    let user_service = Arc::new(UserService::new(users.clone()));
    let exercise_service = Arc::new(ExerciseService::new(users, exercises, clock));
    web::Data::new(HttpState::new(HttpStatePorts {
        users: user_service.clone(),
        users_query: user_service,
        exercises: exercise_service.clone(),
        exercise_log: exercise_service,
    }))
}
