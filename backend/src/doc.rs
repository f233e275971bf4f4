//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint together with the request and
//! response DTOs and the [`ErrorSchema`] wrapper for the domain error. The
//! document backs Swagger UI in debug builds and is printed by the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::exercises::{
    AddExerciseRequestBody, ExerciseLogBody, ExerciseResponseBody, LogEntryBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CreateUserRequestBody, UserBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise tracker API",
        description = "Create users, log exercises and read filtered exercise logs."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::exercises::add_exercise,
        crate::inbound::http::exercises::exercise_log,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateUserRequestBody,
        UserBody,
        AddExerciseRequestBody,
        ExerciseResponseBody,
        LogEntryBody,
        ExerciseLogBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "User registration and listing"),
        (name = "exercises", description = "Exercise logging and history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
