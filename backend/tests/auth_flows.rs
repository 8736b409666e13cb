//! End-to-end account flows over the HTTP surface.
//!
//! Registration, login, and `/auth/me` run against the real adapter
//! stack: in-memory stores, Argon2 hashing, and signed JWTs.

// Shared rig keeps helpers used by the other integration suites.
#[allow(dead_code)]
mod support;

use actix_http::Request;
use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceResponse},
    http::{StatusCode, header},
    test::{self, TestRequest},
};
use rstest::rstest;
use serde_json::{Value, json};

use backend::domain::{INVALID_CREDENTIALS, Role, UserId};
use backend::domain::ports::TokenService as _;
use backend::inbound::http::identity::AUTHENTICATION_REQUIRED;

use support::{init_app, register_payload, rig};

async fn register_ok(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    name: &str,
    email: &str,
) -> Value {
    let response = test::call_service(
        app,
        TestRequest::post()
            .uri("/auth/register")
            .set_json(register_payload(name, email))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    test::read_body_json(response).await
}

#[rstest]
#[actix_web::test]
async fn registering_signs_the_account_in() {
    let rig = rig();
    let app = init_app(rig.state.clone()).await;

    let body = register_ok(&app, "Pit Boss", "Pit@Example.com").await;

    assert_eq!(body["user"]["email"], "pit@example.com");
    assert_eq!(body["user"]["name"], "Pit Boss");
    assert_eq!(body["user"]["role"], "user");
    let user = body["user"].as_object().expect("user object");
    assert!(!user.contains_key("password"));
    assert!(!user.contains_key("passwordHash"));
    assert!(!user.contains_key("phone"), "omitted phone stays absent");
    let token = body["token"].as_str().expect("token string");
    assert!(!token.is_empty());
}

#[rstest]
#[actix_web::test]
async fn registration_collects_every_field_failure() {
    let rig = rig();
    let app = init_app(rig.state.clone()).await;

    let response = test::call_service(
        &app,
        TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({
                "name": "   ",
                "email": "not-an-email",
                "password": "abc",
                "confirmPassword": "abcd",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Validation failed");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|error| error["field"].as_str().expect("field name"))
        .collect();
    assert_eq!(fields, ["name", "email", "password", "confirmPassword"]);
}

#[rstest]
#[actix_web::test]
async fn duplicate_emails_conflict_in_any_casing() {
    let rig = rig();
    let app = init_app(rig.state.clone()).await;
    register_ok(&app, "First Griller", "smoke@example.com").await;

    let response = test::call_service(
        &app,
        TestRequest::post()
            .uri("/auth/register")
            .set_json(register_payload("Second Griller", "SMOKE@EXAMPLE.COM"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Email already registered");
}

#[rstest]
#[actix_web::test]
async fn login_returns_a_verifiable_token() {
    let rig = rig();
    let app = init_app(rig.state.clone()).await;
    let created = register_ok(&app, "Pit Boss", "pit@example.com").await;

    let response = test::call_service(
        &app,
        TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({
                "email": "pit@example.com",
                "password": "smokering",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["user"]["id"], created["user"]["id"]);

    let principal = rig
        .tokens
        .verify(body["token"].as_str().expect("token"))
        .expect("issued token verifies");
    assert_eq!(
        principal.user_id.to_string(),
        created["user"]["id"].as_str().expect("user id"),
    );
}

#[rstest]
#[actix_web::test]
async fn failed_logins_are_indistinguishable() {
    let rig = rig();
    let app = init_app(rig.state.clone()).await;
    register_ok(&app, "Victim", "victim@example.com").await;

    let unknown = test::call_service(
        &app,
        TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({
                "email": "nobody@example.com",
                "password": "whatever123",
            }))
            .to_request(),
    )
    .await;
    let wrong = test::call_service(
        &app,
        TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({
                "email": "victim@example.com",
                "password": "not-smokering",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let unknown_body = test::read_body(unknown).await;
    let wrong_body = test::read_body(wrong).await;
    assert_eq!(
        unknown_body, wrong_body,
        "rejections must not reveal which credential failed"
    );
    let parsed: Value = serde_json::from_slice(&unknown_body).expect("json body");
    assert_eq!(parsed["message"], INVALID_CREDENTIALS);
}

#[rstest]
#[actix_web::test]
async fn me_round_trips_the_bearer_token() {
    let rig = rig();
    let app = init_app(rig.state.clone()).await;
    let created = register_ok(&app, "Pit Boss", "pit@example.com").await;
    let token = created["token"].as_str().expect("token");

    let response = test::call_service(
        &app,
        TestRequest::get()
            .uri("/auth/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().contains_key("trace-id"),
        "every response carries a trace id"
    );
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["user"]["email"], "pit@example.com");
}

#[rstest]
#[actix_web::test]
async fn me_without_a_token_is_unauthorised() {
    let rig = rig();
    let app = init_app(rig.state.clone()).await;

    let response =
        test::call_service(&app, TestRequest::get().uri("/auth/me").to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], AUTHENTICATION_REQUIRED);
}

#[rstest]
#[case::bare_scheme("Bearer")]
#[case::empty_token("Bearer ")]
#[case::wrong_scheme("Token {token}")]
#[case::lowercase_scheme("bearer {token}")]
#[case::extra_segment("Bearer {token} twice")]
#[actix_web::test]
async fn malformed_authorization_headers_are_unauthorised(#[case] template: &str) {
    let rig = rig();
    let app = init_app(rig.state.clone()).await;
    let created = register_ok(&app, "Pit Boss", "pit@example.com").await;
    let token = created["token"].as_str().expect("token");

    let response = test::call_service(
        &app,
        TestRequest::get()
            .uri("/auth/me")
            .insert_header((header::AUTHORIZATION, template.replace("{token}", token)))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], AUTHENTICATION_REQUIRED);
}

#[rstest]
#[actix_web::test]
async fn tampered_tokens_are_unauthorised() {
    let rig = rig();
    let app = init_app(rig.state.clone()).await;
    let created = register_ok(&app, "Pit Boss", "pit@example.com").await;
    let mut token = created["token"].as_str().expect("token").to_owned();
    let swapped = if token.ends_with('a') { 'b' } else { 'a' };
    token.pop();
    token.push(swapped);

    let response = test::call_service(
        &app,
        TestRequest::get()
            .uri("/auth/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn tokens_for_vanished_accounts_read_as_not_found() {
    let rig = rig();
    let app = init_app(rig.state.clone()).await;

    let response = test::call_service(
        &app,
        TestRequest::get()
            .uri("/auth/me")
            .insert_header((
                header::AUTHORIZATION,
                rig.bearer_for(UserId::random(), Role::User),
            ))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "User not found");
}
