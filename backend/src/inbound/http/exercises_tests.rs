//! Tests for the exercise HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::{
    Description, ExerciseDate, ExerciseId, LogLimit, User, UserId, Username,
};
use crate::inbound::http::test_utils::{TestPorts, test_app};

const ADA_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn ada() -> User {
    User::new(
        UserId::new(ADA_ID).expect("valid id"),
        Username::new("ada").expect("valid username"),
    )
}

fn stored(user: &User, draft: ExerciseDraft) -> Exercise {
    let today = ExerciseDate::parse("2024-01-01").expect("fixture date");
    Exercise::new(
        ExerciseId::random(),
        user.id().clone(),
        draft.description,
        draft.duration,
        draft.date.unwrap_or(today),
    )
}

async fn post_exercise(ports: TestPorts, path: &str, body: Value) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::post()
        .uri(path)
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

async fn get_log(ports: TestPorts, uri: &str) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports)).await;
    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

#[rstest]
#[actix_web::test]
async fn add_exercise_returns_user_id_and_rendered_date(ada: User) {
    let mut ports = TestPorts::default();
    let owner = ada.clone();
    ports
        .exercises
        .expect_add_exercise()
        .withf(|request| {
            request.user_id.as_ref() == ADA_ID
                && request.draft.duration.get() == 30
                && request.draft.date.map(|d| d.to_string()).as_deref()
                    == Some("Wed Jan 10 2024")
        })
        .times(1)
        .return_once(move |request| {
            let exercise = stored(&owner, request.draft);
            Ok(AddExerciseResponse {
                user: owner,
                exercise,
            })
        });

    let (status, body) = post_exercise(
        ports,
        &format!("/api/users/{ADA_ID}/exercises"),
        json!({ "description": "run", "duration": 30, "date": "2024-01-10" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "username": "ada",
            "description": "run",
            "duration": 30,
            "date": "Wed Jan 10 2024",
            "_id": ADA_ID
        })
    );
}

#[rstest]
#[case(json!({ "description": "run", "duration": "45" }), 45)]
#[case(json!({ "description": "run", "duration": 45.0 }), 45)]
#[case(json!({ "description": "run", "duration": 45, "date": "" }), 45)]
#[actix_web::test]
async fn add_exercise_accepts_equivalent_duration_forms(
    ada: User,
    #[case] payload: Value,
    #[case] minutes: u32,
) {
    let mut ports = TestPorts::default();
    ports
        .exercises
        .expect_add_exercise()
        .withf(move |request| request.draft.duration.get() == minutes && request.draft.date.is_none())
        .return_once(move |request| {
            let exercise = stored(&ada, request.draft);
            Ok(AddExerciseResponse { user: ada, exercise })
        });

    let (status, _) = post_exercise(ports, &format!("/api/users/{ADA_ID}/exercises"), payload).await;

    assert_eq!(status, StatusCode::CREATED);
}

#[rstest]
#[case(json!({ "duration": 30 }), "description", "missing_field")]
#[case(json!({ "description": " ", "duration": 30 }), "description", "invalid_description")]
#[case(json!({ "description": "run" }), "duration", "missing_field")]
#[case(json!({ "description": "run", "duration": 0 }), "duration", "invalid_duration")]
#[case(json!({ "description": "run", "duration": -5 }), "duration", "invalid_duration")]
#[case(json!({ "description": "run", "duration": 12.5 }), "duration", "invalid_duration")]
#[case(json!({ "description": "run", "duration": "soon" }), "duration", "invalid_duration")]
#[case(json!({ "description": "run", "duration": 1441 }), "duration", "invalid_duration")]
#[case(json!({ "description": "run", "duration": 30, "date": "later" }), "date", "invalid_date")]
#[case(json!({ "description": "run", "duration": 30, "date": "-5000-01-01" }), "date", "invalid_date")]
#[actix_web::test]
async fn add_exercise_rejects_invalid_fields(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut ports = TestPorts::default();
    ports.exercises.expect_add_exercise().never();

    let (status, body) =
        post_exercise(ports, &format!("/api/users/{ADA_ID}/exercises"), payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn add_exercise_validates_before_resolving_the_user() {
    let mut ports = TestPorts::default();
    ports.exercises.expect_add_exercise().never();

    let (status, _) = post_exercise(
        ports,
        "/api/users/not-a-uuid/exercises",
        json!({ "description": "run" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn add_exercise_for_non_uuid_id_is_not_found() {
    let mut ports = TestPorts::default();
    ports.exercises.expect_add_exercise().never();

    let (status, body) = post_exercise(
        ports,
        "/api/users/abc/exercises",
        json!({ "description": "run", "duration": 30 }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User with id abc not found");
}

#[rstest]
#[actix_web::test]
async fn exercise_log_parses_filters(ada: User) {
    let mut ports = TestPorts::default();
    let owner = ada.clone();
    let entry = Exercise::new(
        ExerciseId::random(),
        ada.id().clone(),
        Description::new("swim").expect("description"),
        DurationMinutes::new(20).expect("duration"),
        ExerciseDate::parse("2024-01-10").expect("date"),
    );
    let expected_filter = ExerciseLogFilter {
        from: Some(ExerciseDate::parse("2024-01-05").expect("date")),
        to: Some(ExerciseDate::parse("2024-01-15").expect("date")),
        limit: LogLimit::new(2),
    };
    ports
        .exercise_log
        .expect_exercise_log()
        .withf(move |request| request.user_id.as_ref() == ADA_ID && request.filter == expected_filter)
        .return_once(move |_| Ok(ExerciseLog::new(owner, vec![entry])));

    let (status, body) = get_log(
        ports,
        &format!("/api/users/{ADA_ID}/logs?from=2024-01-05&to=2024-01-15&limit=2"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "username": "ada",
            "count": 1,
            "_id": ADA_ID,
            "log": [{ "description": "swim", "duration": 20, "date": "Wed Jan 10 2024" }]
        })
    );
}

#[rstest]
#[actix_web::test]
async fn exercise_log_treats_empty_parameters_as_absent(ada: User) {
    let mut ports = TestPorts::default();
    ports
        .exercise_log
        .expect_exercise_log()
        .withf(|request| request.filter == ExerciseLogFilter::default())
        .return_once(move |_| Ok(ExerciseLog::new(ada, Vec::new())));

    let (status, body) = get_log(ports, &format!("/api/users/{ADA_ID}/logs?from=&to=&limit=")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["log"], json!([]));
}

#[rstest]
#[case("limit=0", "limit", "invalid_limit")]
#[case("limit=-3", "limit", "invalid_limit")]
#[case("limit=all", "limit", "invalid_limit")]
#[case("from=yesterday", "from", "invalid_date")]
#[case("to=2024-13-01", "to", "invalid_date")]
#[case("from=-5000-01-01", "from", "invalid_date")]
#[actix_web::test]
async fn exercise_log_rejects_invalid_parameters(
    #[case] query: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut ports = TestPorts::default();
    ports.exercise_log.expect_exercise_log().never();

    let (status, body) = get_log(ports, &format!("/api/users/{ADA_ID}/logs?{query}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn exercise_log_maps_unavailable_store_to_503() {
    let mut ports = TestPorts::default();
    ports
        .exercise_log
        .expect_exercise_log()
        .return_once(|_| Err(Error::service_unavailable("user repository unavailable")));

    let (status, body) = get_log(ports, &format!("/api/users/{ADA_ID}/logs")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
}
