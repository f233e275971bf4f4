//! Exercise HTTP handlers.
//!
//! ```text
//! POST /api/users/{_id}/exercises {"description":"run","duration":30,"date":"2024-01-01"}
//! GET /api/users/{_id}/logs?from=2024-01-01&to=2024-01-31&limit=10
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{AddExerciseRequest, AddExerciseResponse, ExerciseLogRequest};
use crate::domain::{
    DurationMinutes, Error, Exercise, ExerciseDraft, ExerciseLog, ExerciseLogFilter,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::JsonOrForm;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    DATE, DURATION, FROM, TO, invalid_body_error, invalid_duration_error, missing_field_error,
    non_blank, parse_description, parse_optional_date, parse_optional_limit, parse_user_id,
};

/// Duration as sent by clients: a JSON number or, from forms, text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DurationInput {
    Number(Number),
    Text(String),
}

/// Request body for `POST /api/users/{_id}/exercises`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddExerciseRequestBody {
    #[schema(example = "Morning run")]
    pub description: Option<String>,
    /// Whole minutes, `1..=1440`.
    #[schema(value_type = Option<u32>, example = 30)]
    pub duration: Option<DurationInput>,
    /// Defaults to the current UTC day when absent or blank.
    #[schema(example = "2024-01-01")]
    pub date: Option<String>,
}

/// Query string accepted by `GET /api/users/{_id}/logs`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExerciseLogQueryParams {
    /// Earliest date to include (inclusive).
    #[param(example = "2024-01-01")]
    pub from: Option<String>,
    /// Latest date to include (inclusive).
    #[param(example = "2024-01-31")]
    pub to: Option<String>,
    /// Maximum number of entries, at least 1.
    #[param(value_type = Option<u32>, example = 10)]
    pub limit: Option<String>,
}

/// Response for a stored exercise. `_id` is the owning user's id.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ExerciseResponseBody {
    pub username: String,
    pub description: String,
    pub duration: u32,
    #[schema(example = "Mon Jan 01 2024")]
    pub date: String,
    #[serde(rename = "_id")]
    #[schema(format = "uuid")]
    pub id: String,
}

impl From<AddExerciseResponse> for ExerciseResponseBody {
    fn from(value: AddExerciseResponse) -> Self {
        let AddExerciseResponse { user, exercise } = value;
        Self {
            username: user.username().to_string(),
            description: exercise.description().to_string(),
            duration: exercise.duration().get(),
            date: exercise.date().to_string(),
            id: user.id().to_string(),
        }
    }
}

/// Single entry of a user's log.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LogEntryBody {
    pub description: String,
    pub duration: u32,
    #[schema(example = "Mon Jan 01 2024")]
    pub date: String,
}

impl From<&Exercise> for LogEntryBody {
    fn from(value: &Exercise) -> Self {
        Self {
            description: value.description().to_string(),
            duration: value.duration().get(),
            date: value.date().to_string(),
        }
    }
}

/// Filtered exercise log; `count` is the length of `log`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ExerciseLogBody {
    pub username: String,
    pub count: usize,
    #[serde(rename = "_id")]
    #[schema(format = "uuid")]
    pub id: String,
    pub log: Vec<LogEntryBody>,
}

impl From<ExerciseLog> for ExerciseLogBody {
    fn from(value: ExerciseLog) -> Self {
        Self {
            username: value.user().username().to_string(),
            count: value.count(),
            id: value.user().id().to_string(),
            log: value.entries().iter().map(LogEntryBody::from).collect(),
        }
    }
}

const WHOLE_MINUTES_MESSAGE: &str = "duration must be a whole number of minutes";

fn whole_number(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|value| value.fract() == 0.0 && value.abs() <= f64::from(u32::MAX))
            .map(|value| value as i64)
    })
}

fn parse_duration(value: Option<DurationInput>) -> Result<DurationMinutes, Error> {
    let (minutes, raw) = match value {
        None => return Err(missing_field_error(DURATION)),
        Some(DurationInput::Number(number)) => (whole_number(&number), number.to_string()),
        Some(DurationInput::Text(text)) => {
            let text = non_blank(Some(text)).ok_or_else(|| missing_field_error(DURATION))?;
            (text.trim().parse::<i64>().ok(), text)
        }
    };
    let Some(minutes) = minutes else {
        return Err(invalid_duration_error(WHOLE_MINUTES_MESSAGE, raw));
    };
    DurationMinutes::from_i64(minutes).map_err(|err| invalid_duration_error(err.to_string(), raw))
}

fn parse_exercise_draft(body: AddExerciseRequestBody) -> Result<ExerciseDraft, Error> {
    let AddExerciseRequestBody {
        description,
        duration,
        date,
    } = body;
    Ok(ExerciseDraft {
        description: parse_description(description)?,
        duration: parse_duration(duration)?,
        date: parse_optional_date(date, DATE)?,
    })
}

fn parse_log_filter(query_string: &str) -> Result<ExerciseLogFilter, Error> {
    let params = web::Query::<ExerciseLogQueryParams>::from_query(query_string)
        .map_err(|err| invalid_body_error(format!("invalid query string: {err}")))?
        .into_inner();
    Ok(ExerciseLogFilter {
        from: parse_optional_date(params.from, FROM)?,
        to: parse_optional_date(params.to, TO)?,
        limit: parse_optional_limit(params.limit)?,
    })
}

/// Log an exercise for a user.
///
/// The body is validated before the user is looked up, so an invalid body
/// for an unknown user yields 400 and a 404 never stores anything.
#[utoipa::path(
    post,
    path = "/api/users/{_id}/exercises",
    params(("_id" = String, Path, description = "User id")),
    request_body = AddExerciseRequestBody,
    responses(
        (status = 201, description = "Exercise stored", body = ExerciseResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "addExercise"
)]
#[post("/users/{_id}/exercises")]
pub async fn add_exercise(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: JsonOrForm<AddExerciseRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = parse_exercise_draft(payload.into_inner())?;
    let user_id = parse_user_id(&path.into_inner())?;

    let response = state
        .exercises
        .add_exercise(AddExerciseRequest { user_id, draft })
        .await?;

    Ok(HttpResponse::Created().json(ExerciseResponseBody::from(response)))
}

/// Read a user's exercise log in insertion order.
#[utoipa::path(
    get,
    path = "/api/users/{_id}/logs",
    params(
        ("_id" = String, Path, description = "User id"),
        ExerciseLogQueryParams
    ),
    responses(
        (status = 200, description = "Exercise log", body = ExerciseLogBody),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "exerciseLog"
)]
#[get("/users/{_id}/logs")]
pub async fn exercise_log(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<web::Json<ExerciseLogBody>> {
    let filter = parse_log_filter(req.query_string())?;
    let user_id = parse_user_id(&path.into_inner())?;

    let log = state
        .exercise_log
        .exercise_log(ExerciseLogRequest { user_id, filter })
        .await?;

    Ok(web::Json(ExerciseLogBody::from(log)))
}

#[cfg(test)]
#[path = "exercises_tests.rs"]
mod tests;
