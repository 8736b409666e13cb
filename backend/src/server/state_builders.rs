//! Construction of the shared HTTP state from server configuration.
//!
//! All wiring decisions live here: which adapters back which ports and
//! how they share the clock. Handlers only ever see the port traits.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use backend::domain::{CredentialAccountService, GrillCommandService, GrillQueryService};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{InMemoryGrillStore, InMemoryUserStore};
use backend::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::ServerConfig;

/// Wire the stores, services and token signer into one [`HttpState`].
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(InMemoryUserStore::new());
    let grills = Arc::new(InMemoryGrillStore::new());
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let tokens = Arc::new(JwtTokenService::new(
        &config.token_secret,
        Arc::clone(&clock),
    ));

    let accounts = Arc::new(CredentialAccountService::new(
        Arc::clone(&users),
        hasher,
        Arc::clone(&tokens),
        Arc::clone(&clock),
    ));
    let grill_commands = Arc::new(GrillCommandService::new(
        Arc::clone(&grills),
        Arc::clone(&users),
        clock,
    ));
    let grill_queries = Arc::new(GrillQueryService::new(grills, users));

    web::Data::new(HttpState::new(accounts, grill_commands, grill_queries, tokens))
}
