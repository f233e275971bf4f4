//! Users API handlers.
//!
//! ```text
//! POST /api/users {"username":"ada"}
//! GET /api/users
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;
use crate::domain::ports::CreateUserRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::JsonOrForm;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_username;

/// Request body for `POST /api/users`, as JSON or a URL-encoded form.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequestBody {
    #[schema(example = "fcc_test")]
    pub username: Option<String>,
}

/// Public projection of a user: only the id and username.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UserBody {
    pub username: String,
    #[serde(rename = "_id")]
    #[schema(format = "uuid")]
    pub id: String,
}

impl From<&User> for UserBody {
    fn from(value: &User) -> Self {
        Self {
            username: value.username().to_string(),
            id: value.id().to_string(),
        }
    }
}

/// Register a user under a fresh identifier.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequestBody,
    responses(
        (status = 201, description = "User created", body = UserBody),
        (status = 400, description = "Invalid or duplicate username", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: JsonOrForm<CreateUserRequestBody>,
) -> ApiResult<HttpResponse> {
    let username = parse_username(payload.into_inner().username)?;
    let user = state
        .users
        .create_user(CreateUserRequest { username })
        .await?;
    Ok(HttpResponse::Created().json(UserBody::from(&user)))
}

/// List every registered user in creation order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use exercise_tracker::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserBody]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserBody>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.iter().map(UserBody::from).collect()))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
