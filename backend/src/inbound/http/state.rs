//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ExerciseCommand, ExerciseLogQuery, UsersCommand, UsersQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub exercises: Arc<dyn ExerciseCommand>,
    pub exercise_log: Arc<dyn ExerciseLogQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub exercises: Arc<dyn ExerciseCommand>,
    pub exercise_log: Arc<dyn ExerciseLogQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use exercise_tracker::domain::{ExerciseService, UserService};
    /// use exercise_tracker::inbound::http::state::{HttpState, HttpStatePorts};
    /// use exercise_tracker::outbound::memory::{
    ///     InMemoryExerciseRepository, InMemoryUserRepository,
    /// };
    ///
    /// let users = Arc::new(InMemoryUserRepository::new());
    /// let exercises = Arc::new(InMemoryExerciseRepository::new());
    /// let user_service = Arc::new(UserService::new(users.clone()));
    /// let exercise_service = Arc::new(ExerciseService::new(
    ///     users,
    ///     exercises,
    ///     Arc::new(mockable::DefaultClock),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     users: user_service.clone(),
    ///     users_query: user_service,
    ///     exercises: exercise_service.clone(),
    ///     exercise_log: exercise_service,
    /// });
    /// let _users = state.users.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            users_query,
            exercises,
            exercise_log,
        } = ports;
        Self {
            users,
            users_query,
            exercises,
            exercise_log,
        }
    }
}
