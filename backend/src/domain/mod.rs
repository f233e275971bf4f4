//! Domain primitives, services and ports.
//!
//! Strongly typed entities shared by the HTTP and persistence adapters.
//! Types are immutable once constructed.
//!
//! Public surface:
//! - Error, ErrorCode: transport-agnostic error payload.
//! - User, Username, UserId: registered users.
//! - Exercise, ExerciseDraft, ExerciseDate, DurationMinutes, Description:
//!   logged exercises and their validated fields.
//! - ExerciseLog, ExerciseLogFilter, LogLimit: filtered exercise history.
//! - UserService, ExerciseService: driving port implementations.
//! - TraceId: request correlation identifier.

pub mod error;
pub mod exercise;
pub mod exercise_log;
pub mod exercise_service;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{EmptyErrorMessage, Error, ErrorCode};
pub use self::exercise::{
    Description, DurationMinutes, Exercise, ExerciseDate, ExerciseDraft, ExerciseId,
    ExerciseValidationError,
};
pub use self::exercise_log::{ExerciseLog, ExerciseLogFilter, InvalidLogLimit, LogLimit};
pub use self::exercise_service::ExerciseService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserValidationError, Username};
pub use self::user_service::UserService;

