//! Tests for the users HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::{Error, UserId, Username};
use crate::inbound::http::test_utils::{TestPorts, test_app};

const ADA_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn ada() -> User {
    User::new(
        UserId::new(ADA_ID).expect("valid id"),
        Username::new("ada").expect("valid username"),
    )
}

#[rstest]
#[actix_web::test]
async fn create_user_returns_201_with_username_and_id() {
    let mut ports = TestPorts::default();
    ports
        .users
        .expect_create_user()
        .withf(|request| request.username.as_ref() == "ada")
        .times(1)
        .return_once(|_| Ok(ada()));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "username": "  ada " }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "username": "ada", "_id": ADA_ID }));
}

#[rstest]
#[actix_web::test]
async fn create_user_accepts_form_bodies() {
    let mut ports = TestPorts::default();
    ports
        .users
        .expect_create_user()
        .return_once(|_| Ok(ada()));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_form([("username", "ada")])
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[rstest]
#[case(json!({}), "missing_field")]
#[case(json!({ "username": "" }), "invalid_username")]
#[case(json!({ "username": "   " }), "invalid_username")]
#[actix_web::test]
async fn create_user_rejects_invalid_usernames(#[case] payload: Value, #[case] code: &str) {
    let mut ports = TestPorts::default();
    ports.users.expect_create_user().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "username");
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn create_user_surfaces_duplicate_username_as_400() {
    let mut ports = TestPorts::default();
    ports.users.expect_create_user().return_once(|_| {
        Err(Error::invalid_request("Username already exists")
            .with_details(json!({ "field": "username", "code": "duplicate_username" })))
    });
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "username": "ada" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Username already exists");
}

#[rstest]
#[actix_web::test]
async fn list_users_projects_id_and_username() {
    let mut ports = TestPorts::default();
    let bob = User::new(UserId::random(), Username::new("bob").expect("valid username"));
    let bob_id = bob.id().to_string();
    ports
        .users_query
        .expect_list_users()
        .return_once(move || Ok(vec![ada(), bob]));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::get().uri("/api/users").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!([
            { "_id": ADA_ID, "username": "ada" },
            { "_id": bob_id, "username": "bob" }
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn list_users_redacts_internal_errors() {
    let mut ports = TestPorts::default();
    ports
        .users_query
        .expect_list_users()
        .return_once(|| Err(Error::internal("relation users does not exist")));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::get().uri("/api/users").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Internal server error");
}
