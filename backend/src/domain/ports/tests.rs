//! Shared coverage for port fixtures and error constructors.

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::{EmailAddress, Grill, GrillDraft, GrillId, Role, User, UserDraft, UserId};

fn sample_user() -> User {
    User::new(UserDraft {
        id: UserId::random(),
        name: "Pit Boss".to_owned(),
        email: EmailAddress::new("pit@example.com").expect("valid email"),
        phone: Some("+40 700 000 000".to_owned()),
        password_hash: "$argon2id$hash".to_owned(),
        role: Role::User,
        created_at: Utc::now(),
    })
    .expect("valid draft")
}

fn sample_grill(owner_id: UserId) -> Grill {
    Grill::new(GrillDraft {
        id: GrillId::random(),
        title: "Smoky Ribs".to_owned(),
        description: "Low and slow over hickory".to_owned(),
        image_ref: None,
        owner_id,
        created_at: Utc::now(),
    })
    .expect("valid draft")
}

#[rstest]
#[tokio::test]
async fn fixture_user_store_accepts_writes_and_finds_nothing() {
    let store = FixtureUserStore;
    let user = sample_user();

    store.insert(&user).await.expect("fixture insert succeeds");
    let by_id = store
        .find_by_id(user.id())
        .await
        .expect("fixture lookup succeeds");
    let by_email = store
        .find_by_email(user.email())
        .await
        .expect("fixture lookup succeeds");

    assert!(by_id.is_none());
    assert!(by_email.is_none());
}

#[rstest]
#[tokio::test]
async fn fixture_grill_store_lists_nothing_and_rejects_updates() {
    let store = FixtureGrillStore;
    let grill = sample_grill(UserId::random());

    store.insert(&grill).await.expect("fixture insert succeeds");
    let listed = store.list_all().await.expect("fixture list succeeds");
    assert!(listed.is_empty());

    let update = store.update(&grill).await;
    assert_eq!(update, Err(GrillStoreError::not_found()));
    let delete = store.delete(grill.id()).await;
    assert_eq!(delete, Err(GrillStoreError::not_found()));
}

#[rstest]
#[tokio::test]
async fn fixture_password_hasher_round_trips() {
    let hasher = FixturePasswordHasher;
    let hash = hasher.hash("secret123").await.expect("fixture hashes");

    assert!(
        hasher
            .verify("secret123", &hash)
            .await
            .expect("fixture verifies")
    );
    assert!(
        !hasher
            .verify("wrong", &hash)
            .await
            .expect("fixture verifies")
    );
}

#[rstest]
fn fixture_token_service_round_trips_user_ids() {
    let tokens = FixtureTokenService;
    let id = UserId::random();

    let token = tokens.issue(&id, Role::User).expect("fixture issues");
    let principal = tokens.verify(&token).expect("fixture verifies");

    assert_eq!(principal.user_id, id);
}

#[rstest]
fn fixture_token_service_rejects_garbage() {
    let tokens = FixtureTokenService;
    let result = tokens.verify("definitely-not-a-token");
    assert_eq!(result, Err(TokenServiceError::malformed()));
}

#[rstest]
fn duplicate_email_error_names_the_address() {
    let err = UserStoreError::duplicate_email("pit@example.com");
    assert!(err.to_string().contains("pit@example.com"));
}

#[rstest]
#[case(TokenServiceError::expired(), "token expired")]
#[case(TokenServiceError::malformed(), "token malformed")]
#[case(TokenServiceError::bad_signature(), "token signature invalid")]
fn token_error_messages_stay_stable(#[case] err: TokenServiceError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}
