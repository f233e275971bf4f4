//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are what inbound adapters call; they
//! return the transport agnostic [`crate::domain::Error`]. Driven ports
//! (`*Repository`) are implemented by outbound adapters and surface typed
//! errors generated by [`define_port_error`].

mod macros;
pub(crate) use macros::define_port_error;

mod exercise_command;
mod exercise_log_query;
mod exercise_repository;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use exercise_command::MockExerciseCommand;
pub use exercise_command::{AddExerciseRequest, AddExerciseResponse, ExerciseCommand};
#[cfg(test)]
pub use exercise_log_query::MockExerciseLogQuery;
pub use exercise_log_query::{ExerciseLogQuery, ExerciseLogRequest};
#[cfg(test)]
pub use exercise_repository::MockExerciseRepository;
pub use exercise_repository::{ExerciseRepository, ExerciseRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{CreateUserRequest, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
