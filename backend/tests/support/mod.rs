//! Shared wiring for the HTTP integration suites.
//!
//! Builds the same adapter stack the server wires at startup, with a
//! fixed signing secret so suites can mint tokens of their own.

use std::sync::Arc;

use actix_http::Request;
use actix_web::{
    App,
    body::BoxBody,
    dev::{Service, ServiceResponse},
    test, web,
};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};

use backend::Trace;
use backend::domain::{
    CredentialAccountService, GrillCommandService, GrillQueryService, Role, UserId,
};
use backend::domain::ports::TokenService;
use backend::inbound::http::auth::{login, me, register};
use backend::inbound::http::grills::{
    all_grills, create_grill, delete_grill, get_grill, leaderboard, list_grills, my_grills,
    toggle_like, update_grill,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{InMemoryGrillStore, InMemoryUserStore};
use backend::outbound::security::{Argon2PasswordHasher, JwtTokenService};

/// Signing secret shared by every integration rig.
pub const TEST_SECRET: &[u8] = b"integration-test-signing-secret";

/// Real adapter stack behind one [`HttpState`], plus the token signer for
/// suites that mint principals directly.
pub struct TestRig {
    pub state: web::Data<HttpState>,
    pub tokens: Arc<JwtTokenService>,
}

impl TestRig {
    /// An `Authorization` header value for an arbitrary principal.
    pub fn bearer_for(&self, user_id: UserId, role: Role) -> String {
        let token = self.tokens.issue(&user_id, role).expect("token issues");
        format!("Bearer {token}")
    }
}

/// Wire fresh in-memory adapters into a [`TestRig`].
#[must_use]
pub fn rig() -> TestRig {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(InMemoryUserStore::new());
    let grills = Arc::new(InMemoryGrillStore::new());
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let tokens = Arc::new(JwtTokenService::new(TEST_SECRET, Arc::clone(&clock)));

    let accounts = Arc::new(CredentialAccountService::new(
        Arc::clone(&users),
        hasher,
        Arc::clone(&tokens),
        Arc::clone(&clock),
    ));
    let commands = Arc::new(GrillCommandService::new(
        Arc::clone(&grills),
        Arc::clone(&users),
        clock,
    ));
    let queries = Arc::new(GrillQueryService::new(grills, users));

    TestRig {
        state: web::Data::new(HttpState::new(
            accounts,
            commands,
            queries,
            Arc::clone(&tokens) as Arc<dyn TokenService>,
        )),
        tokens,
    }
}

/// Initialise the full route table the server exposes.
pub async fn init_app(
    state: web::Data<HttpState>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(state)
            .wrap(Trace)
            .service(
                web::scope("/auth")
                    .service(register)
                    .service(login)
                    .service(me),
            )
            .service(
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
            ),
    )
    .await
}

/// Registration payload with a fixed valid password pair.
#[must_use]
pub fn register_payload(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "password": "smokering",
        "confirmPassword": "smokering",
    })
}

/// Creation payload with a description that clears the length floor.
#[must_use]
pub fn grill_payload(title: &str, description: &str) -> Value {
    json!({
        "title": title,
        "description": description,
    })
}
