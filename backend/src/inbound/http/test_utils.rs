//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};

use crate::Trace;
use crate::domain::ports::{
    MockExerciseCommand, MockExerciseLogQuery, MockUsersCommand, MockUsersQuery,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::api_routes;

/// Mock driving ports; unconfigured mocks panic when called.
#[derive(Default)]
pub struct TestPorts {
    pub users: MockUsersCommand,
    pub users_query: MockUsersQuery,
    pub exercises: MockExerciseCommand,
    pub exercise_log: MockExerciseLogQuery,
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            users: Arc::new(self.users),
            users_query: Arc::new(self.users_query),
            exercises: Arc::new(self.exercises),
            exercise_log: Arc::new(self.exercise_log),
        })
    }
}

/// Build an app exposing the `/api` routes over `ports`.
pub fn test_app(
    ports: TestPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .wrap(Trace)
        .configure(api_routes)
}
