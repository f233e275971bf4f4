//! Shared helpers for the HTTP behaviour tests.
//!
//! The app is assembled the way the server binary assembles it, over the
//! in-memory adapters and a fixed clock.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use exercise_tracker::Trace;
use exercise_tracker::domain::TRACE_ID_HEADER;
use exercise_tracker::inbound::http::api_routes;
use exercise_tracker::inbound::http::health::{HealthState, live, ready};
use exercise_tracker::inbound::http::landing::index;
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};
use mockable::Clock;
use serde_json::Value;

#[path = "../../src/server/state_builders.rs"]
pub mod state_builders;

/// Clock pinned to a single instant.
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Arc<dyn Clock> {
        let utc_now = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .expect("valid fixture timestamp");
        Arc::new(Self { utc_now })
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// In-memory repositories kept alongside the state so tests can inspect them.
pub struct Store {
    pub users: InMemoryUserRepository,
    pub exercises: InMemoryExerciseRepository,
    pub state: web::Data<HttpState>,
}

impl Store {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let users = InMemoryUserRepository::new();
        let exercises = InMemoryExerciseRepository::new();
        let state = state_builders::state_from_repositories(
            Arc::new(users.clone()),
            Arc::new(exercises.clone()),
            clock,
        );
        Self {
            users,
            exercises,
            state,
        }
    }
}

/// Build the full application around `state`.
pub async fn init_app(
    state: web::Data<HttpState>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    actix_test::init_service(
        App::new()
            .app_data(health)
            .app_data(state)
            .wrap(Trace)
            .configure(api_routes)
            .service(index)
            .service(ready)
            .service(live),
    )
    .await
}

/// Status, `trace-id` header and body of a response; non-JSON bodies are
/// kept as a string.
#[derive(Debug)]
pub struct Snapshot {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

pub async fn send<S>(app: &S, request: Request) -> Snapshot
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    Snapshot {
        status,
        trace_id,
        body,
    }
}

pub async fn post_json<S>(app: &S, uri: &str, body: Value) -> Snapshot
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    send(app, request).await
}

pub async fn get<S>(app: &S, uri: &str) -> Snapshot
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    send(app, actix_test::TestRequest::get().uri(uri).to_request()).await
}

/// Create a user and return its id.
pub async fn create_user<S>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let created = post_json(app, "/api/users", serde_json::json!({ "username": username })).await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    created.body["_id"]
        .as_str()
        .expect("created user has an id")
        .to_owned()
}
