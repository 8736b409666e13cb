//! HTTP-level tests for the grill endpoints.
//!
//! Handlers are exercised against mocked driving ports, so these tests
//! pin the wire contract (statuses, envelopes, field names) rather than
//! the domain rules behind it.

use std::sync::Arc;

use actix_web::http::{Method, StatusCode};
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    FixtureAccountService, FixtureTokenService, LeaderboardOwner, MockGrillCommand,
    MockGrillQuery, MockTokenService, OwnerSummary, TokenService,
};
use crate::domain::{
    ACCESS_FORBIDDEN, DomainError, GRILL_NOT_FOUND, GrillId, Role, SortMode, UserId,
};
use crate::inbound::http::identity::{ADMIN_REQUIRED, AUTHENTICATION_REQUIRED};

fn owner_summary() -> OwnerSummary {
    OwnerSummary {
        id: UserId::random(),
        name: "Pit Boss".to_owned(),
        email: "pit@example.com".to_owned(),
    }
}

fn view(title: &str) -> GrillView {
    GrillView {
        id: GrillId::random(),
        title: title.to_owned(),
        description: "Low and slow over hickory".to_owned(),
        image_ref: None,
        likes_count: 0,
        liked_by_current_user: false,
        owner: owner_summary(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn listing(titles: &[&str]) -> GrillListing {
    let items: Vec<GrillView> = titles.iter().map(|title| view(title)).collect();
    GrillListing {
        total: items.len(),
        items,
    }
}

fn entry(title: &str, likes: usize) -> LeaderboardEntry {
    LeaderboardEntry {
        id: GrillId::random(),
        title: title.to_owned(),
        image_ref: Some("grills/hero.jpg".to_owned()),
        likes_count: likes,
        owner: LeaderboardOwner {
            id: UserId::random(),
            name: "Pit Boss".to_owned(),
        },
    }
}

fn test_app(
    commands: MockGrillCommand,
    queries: MockGrillQuery,
    tokens: Arc<dyn TokenService>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(FixtureAccountService),
        Arc::new(commands),
        Arc::new(queries),
        tokens,
    );
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/items")
            .service(list_grills)
            .service(leaderboard)
            .service(my_grills)
            .service(all_grills)
            .service(get_grill)
            .service(create_grill)
            .service(update_grill)
            .service(delete_grill)
            .service(toggle_like),
    )
}

/// App wired with the fixture token service: any `Bearer <uuid>` header
/// authenticates as that user id with the plain user role.
fn user_app(
    commands: MockGrillCommand,
    queries: MockGrillQuery,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    test_app(commands, queries, Arc::new(FixtureTokenService))
}

#[actix_web::test]
async fn lists_grills_for_anonymous_callers() {
    let mut queries = MockGrillQuery::new();
    queries
        .expect_list()
        .withf(|viewer, request| {
            viewer.is_none() && request.query.is_none() && request.sort == SortMode::New
        })
        .times(1)
        .return_once(|_, _| Ok(listing(&["Smoke Ring", "Backyard Beast"])));

    let app = actix_test::init_service(user_app(MockGrillCommand::new(), queries)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/items").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("total").and_then(Value::as_u64), Some(2));
    let first = &body["items"][0];
    assert_eq!(
        first.get("title").and_then(Value::as_str),
        Some("Smoke Ring")
    );
    assert_eq!(
        first.get("likedByCurrentUser").and_then(Value::as_bool),
        Some(false)
    );
    assert_eq!(
        first["owner"].get("email").and_then(Value::as_str),
        Some("pit@example.com")
    );
}

#[actix_web::test]
async fn forwards_search_and_sort_to_the_query_port() {
    let mut queries = MockGrillQuery::new();
    queries
        .expect_list()
        .withf(|viewer, request| {
            viewer.is_none()
                && request.query.as_deref() == Some("smok")
                && request.sort == SortMode::Top
        })
        .times(1)
        .return_once(|_, _| Ok(listing(&["Smoky Beast"])));

    let app = actix_test::init_service(user_app(MockGrillCommand::new(), queries)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/items?q=smok&sort=top")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn rejects_unknown_sort_values() {
    let mut queries = MockGrillQuery::new();
    queries.expect_list().times(0);

    let app = actix_test::init_service(user_app(MockGrillCommand::new(), queries)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/items?sort=hot")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("Validation failed")
    );
    assert_eq!(
        body["errors"][0].get("field").and_then(Value::as_str),
        Some("sort")
    );
}

#[actix_web::test]
async fn identifies_the_viewer_from_a_bearer_token() {
    let caller = UserId::random();
    let mut queries = MockGrillQuery::new();
    queries
        .expect_list()
        .withf(move |viewer, _| *viewer == Some(caller))
        .times(1)
        .return_once(|_, _| Ok(listing(&[])));

    let app = actix_test::init_service(user_app(MockGrillCommand::new(), queries)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/items")
            .insert_header(("Authorization", format!("Bearer {caller}")))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn serves_the_reduced_leaderboard_projection() {
    let mut queries = MockGrillQuery::new();
    queries
        .expect_leaderboard()
        .withf(|limit| limit.is_none())
        .times(1)
        .return_once(|_| Ok(vec![entry("Smoke Ring", 12)]));

    let app = actix_test::init_service(user_app(MockGrillCommand::new(), queries)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/items/leaderboard")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let first = &body["items"][0];
    assert_eq!(
        first.get("title").and_then(Value::as_str),
        Some("Smoke Ring")
    );
    assert_eq!(first.get("likesCount").and_then(Value::as_u64), Some(12));
    assert_eq!(
        first["owner"].get("name").and_then(Value::as_str),
        Some("Pit Boss")
    );
    assert!(
        first.get("description").is_none() && first.get("likedByCurrentUser").is_none(),
        "leaderboard rows stay reduced"
    );
    assert!(
        first["owner"].get("email").is_none(),
        "leaderboard owners expose no email"
    );
}

#[actix_web::test]
async fn forwards_the_parsed_leaderboard_limit() {
    let mut queries = MockGrillQuery::new();
    queries
        .expect_leaderboard()
        .withf(|limit| *limit == Some(2))
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let app = actix_test::init_service(user_app(MockGrillCommand::new(), queries)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/items/leaderboard?limit=2")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn rejects_non_numeric_leaderboard_limits() {
    let mut queries = MockGrillQuery::new();
    queries.expect_leaderboard().times(0);

    let app = actix_test::init_service(user_app(MockGrillCommand::new(), queries)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/items/leaderboard?limit=lots")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["errors"][0].get("field").and_then(Value::as_str),
        Some("limit")
    );
}

#[actix_web::test]
async fn mine_requires_authentication() {
    let mut queries = MockGrillQuery::new();
    queries.expect_mine().times(0);

    let app = actix_test::init_service(user_app(MockGrillCommand::new(), queries)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/items/mine").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(AUTHENTICATION_REQUIRED)
    );
}

#[actix_web::test]
async fn mine_lists_only_the_callers_grills() {
    let caller = UserId::random();
    let mut queries = MockGrillQuery::new();
    queries
        .expect_mine()
        .withf(move |viewer| *viewer == caller)
        .times(1)
        .return_once(|_| Ok(listing(&["My Rig"])));

    let app = actix_test::init_service(user_app(MockGrillCommand::new(), queries)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/items/mine")
            .insert_header(("Authorization", format!("Bearer {caller}")))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("total").and_then(Value::as_u64), Some(1));
}

#[actix_web::test]
async fn all_is_refused_for_non_admins() {
    let mut queries = MockGrillQuery::new();
    queries.expect_list().times(0);

    let app = actix_test::init_service(user_app(MockGrillCommand::new(), queries)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/items/all")
            .insert_header(("Authorization", format!("Bearer {}", UserId::random())))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(ADMIN_REQUIRED)
    );
}

#[actix_web::test]
async fn all_serves_every_grill_to_admins() {
    let admin_id = UserId::random();
    let mut tokens = MockTokenService::new();
    tokens
        .expect_verify()
        .withf(|token| token == "admin-token")
        .times(1)
        .returning(move |_| Ok(Principal::new(admin_id, Role::Admin)));
    let mut queries = MockGrillQuery::new();
    queries
        .expect_list()
        .withf(move |viewer, request| {
            *viewer == Some(admin_id) && *request == ListGrillsRequest::default()
        })
        .times(1)
        .return_once(|_, _| Ok(listing(&["Smoke Ring", "Backyard Beast"])));

    let app = actix_test::init_service(test_app(
        MockGrillCommand::new(),
        queries,
        Arc::new(tokens),
    ))
    .await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/items/all")
            .insert_header(("Authorization", "Bearer admin-token"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("total").and_then(Value::as_u64), Some(2));
}

#[actix_web::test]
async fn malformed_ids_read_as_not_found() {
    let mut queries = MockGrillQuery::new();
    queries.expect_get().times(0);

    let app = actix_test::init_service(user_app(MockGrillCommand::new(), queries)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/items/not-a-uuid")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(GRILL_NOT_FOUND)
    );
}

#[actix_web::test]
async fn serves_a_single_grill() {
    let mut smoked = view("Smoky Ribs");
    smoked.image_ref = Some("grills/ribs.jpg".to_owned());
    smoked.likes_count = 3;
    let grill_id = smoked.id;

    let mut queries = MockGrillQuery::new();
    queries
        .expect_get()
        .withf(move |viewer, id| viewer.is_none() && *id == grill_id)
        .times(1)
        .return_once(move |_, _| Ok(smoked));

    let app = actix_test::init_service(user_app(MockGrillCommand::new(), queries)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/items/{grill_id}"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("id").and_then(Value::as_str),
        Some(grill_id.to_string().as_str())
    );
    assert_eq!(
        body.get("imageRef").and_then(Value::as_str),
        Some("grills/ribs.jpg")
    );
    assert_eq!(body.get("likesCount").and_then(Value::as_u64), Some(3));
}

#[rstest]
#[case::create(
    Method::POST,
    "/items",
    Some(json!({"title": "Smoke Ring", "description": "Long enough description"}))
)]
#[case::update(
    Method::PUT,
    "/items/6f0a1a52-1c3f-4f26-9d55-111111111111",
    Some(json!({}))
)]
#[case::delete(Method::DELETE, "/items/6f0a1a52-1c3f-4f26-9d55-111111111111", None)]
#[case::like(
    Method::POST,
    "/items/6f0a1a52-1c3f-4f26-9d55-111111111111/like",
    None
)]
#[actix_web::test]
async fn mutations_require_authentication(
    #[case] method: Method,
    #[case] uri: &str,
    #[case] body: Option<Value>,
) {
    let app =
        actix_test::init_service(user_app(MockGrillCommand::new(), MockGrillQuery::new())).await;

    let mut request = actix_test::TestRequest::with_uri(uri).method(method);
    if let Some(body) = body {
        request = request.set_json(body);
    }
    let response = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(AUTHENTICATION_REQUIRED)
    );
}

#[actix_web::test]
async fn create_returns_the_created_grill() {
    let caller = UserId::random();
    let mut commands = MockGrillCommand::new();
    commands
        .expect_create()
        .withf(move |principal, request| {
            principal.user_id == caller
                && request.title == "Smoke Ring"
                && request.image_ref.is_none()
        })
        .times(1)
        .return_once(|_, _| Ok(view("Smoke Ring")));

    let app = actix_test::init_service(user_app(commands, MockGrillQuery::new())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/items")
            .insert_header(("Authorization", format!("Bearer {caller}")))
            .set_json(json!({
                "title": "Smoke Ring",
                "description": "Offset smoker with a custom firebox",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("title").and_then(Value::as_str),
        Some("Smoke Ring")
    );
    assert!(
        body.get("createdAt").and_then(Value::as_str).is_some(),
        "timestamps serialise as strings"
    );
}

#[actix_web::test]
async fn update_surfaces_ownership_refusals() {
    let caller = UserId::random();
    let mut commands = MockGrillCommand::new();
    commands
        .expect_update()
        .times(1)
        .return_once(|_, _, _| Err(DomainError::forbidden(ACCESS_FORBIDDEN)));

    let app = actix_test::init_service(user_app(commands, MockGrillQuery::new())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/items/{}", GrillId::random()))
            .insert_header(("Authorization", format!("Bearer {caller}")))
            .set_json(json!({"title": "Hijacked"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some(ACCESS_FORBIDDEN)
    );
    assert!(body.get("errors").is_none());
}

#[actix_web::test]
async fn delete_confirms_with_a_message() {
    let caller = UserId::random();
    let grill_id = GrillId::random();
    let mut commands = MockGrillCommand::new();
    commands
        .expect_delete()
        .withf(move |principal, id| principal.user_id == caller && *id == grill_id)
        .times(1)
        .return_once(|_, _| Ok(()));

    let app = actix_test::init_service(user_app(commands, MockGrillQuery::new())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/items/{grill_id}"))
            .insert_header(("Authorization", format!("Bearer {caller}")))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"message": GRILL_DELETED}));
}

#[actix_web::test]
async fn toggling_a_like_reports_the_new_state() {
    let caller = UserId::random();
    let grill_id = GrillId::random();
    let mut commands = MockGrillCommand::new();
    commands
        .expect_toggle_like()
        .withf(move |principal, id| principal.user_id == caller && *id == grill_id)
        .times(1)
        .return_once(move |_, _| {
            Ok(LikeOutcome {
                id: grill_id,
                likes_count: 5,
                liked_by_current_user: true,
            })
        });

    let app = actix_test::init_service(user_app(commands, MockGrillQuery::new())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/items/{grill_id}/like"))
            .insert_header(("Authorization", format!("Bearer {caller}")))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("id").and_then(Value::as_str),
        Some(grill_id.to_string().as_str())
    );
    assert_eq!(body.get("likesCount").and_then(Value::as_u64), Some(5));
    assert_eq!(
        body.get("likedByCurrentUser").and_then(Value::as_bool),
        Some(true)
    );
}
