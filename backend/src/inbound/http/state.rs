//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, GrillCommand, GrillQuery, TokenService};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::domain::ports::{
///     FixtureAccountService, FixtureGrillCommand, FixtureGrillQuery, FixtureTokenService,
/// };
/// use backend::inbound::http::state::HttpState;
///
/// let state = HttpState::new(
///     Arc::new(FixtureAccountService),
///     Arc::new(FixtureGrillCommand),
///     Arc::new(FixtureGrillQuery),
///     Arc::new(FixtureTokenService),
/// );
/// let _tokens = state.tokens.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub grill_commands: Arc<dyn GrillCommand>,
    pub grill_queries: Arc<dyn GrillQuery>,
    pub tokens: Arc<dyn TokenService>,
}

impl HttpState {
    /// Bundle the driving ports and the token verifier for handlers.
    pub fn new(
        accounts: Arc<dyn AccountService>,
        grill_commands: Arc<dyn GrillCommand>,
        grill_queries: Arc<dyn GrillQuery>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            accounts,
            grill_commands,
            grill_queries,
            tokens,
        }
    }
}
