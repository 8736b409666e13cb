//! Port abstraction for signed bearer token adapters.

use crate::domain::{Principal, Role, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    ///
    /// The verification variants stay distinct for logging, but inbound
    /// adapters collapse them all into one unauthenticated response so the
    /// wire never reveals why a token was rejected.
    pub enum TokenServiceError {
        /// The token was valid once but its lifetime has lapsed.
        Expired => "token expired",
        /// The token is not even structurally a token.
        Malformed => "token malformed",
        /// Structure is fine but the signature does not check out.
        BadSignature => "token signature invalid",
        /// Signing failed inside the adapter.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Port for issuing and verifying signed bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a signed token embedding the user id and role.
    fn issue(&self, user_id: &UserId, role: Role) -> Result<String, TokenServiceError>;

    /// Verify a presented token and recover the principal it names.
    fn verify(&self, token: &str) -> Result<Principal, TokenServiceError>;
}

/// Fixture token service for tests that never inspect tokens.
///
/// Issues the user id itself as the "token" and refuses to verify
/// anything that is not a UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTokenService;

impl TokenService for FixtureTokenService {
    fn issue(&self, user_id: &UserId, _role: Role) -> Result<String, TokenServiceError> {
        Ok(user_id.to_string())
    }

    fn verify(&self, token: &str) -> Result<Principal, TokenServiceError> {
        let id = token
            .parse::<uuid::Uuid>()
            .map_err(|_| TokenServiceError::malformed())?;
        Ok(Principal::new(UserId::from_uuid(id), Role::User))
    }
}
