//! Driving port for account registration, login, and profile reads.
//!
//! Inbound adapters call this port to run credential flows without knowing
//! the backing store, hasher, or token implementation, which keeps HTTP
//! handler tests deterministic with a mocked port.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{DomainError, EmailAddress, Role, User, UserDraft, UserId};

/// Raw registration input as received from the wire.
///
/// Unvalidated on purpose: the use-case collects every field failure into
/// one structured validation error rather than stopping at the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: Option<String>,
}

/// Raw login input as received from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A signed-in account: the stored user plus a fresh bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub user: User,
    pub token: String,
}

/// Domain use-case port for account flows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new account and sign it in.
    async fn register(&self, request: RegisterRequest)
    -> Result<AuthenticatedAccount, DomainError>;

    /// Authenticate existing credentials.
    async fn login(&self, request: LoginRequest) -> Result<AuthenticatedAccount, DomainError>;

    /// Load the account behind a verified principal.
    async fn current_user(&self, user_id: &UserId) -> Result<User, DomainError>;
}

/// Fixture implementation returning a canned signed-in account.
pub struct FixtureAccountService;

fn fixture_user(id: UserId) -> Result<User, DomainError> {
    let email = EmailAddress::new("griller@example.com")
        .map_err(|err| DomainError::internal(format!("invalid fixture email: {err}")))?;
    User::new(UserDraft {
        id,
        name: "Fixture Griller".to_owned(),
        email,
        phone: None,
        password_hash: "fixture-hash".to_owned(),
        role: Role::User,
        created_at: Utc::now(),
    })
    .map_err(|err| DomainError::internal(format!("invalid fixture user: {err}")))
}

#[async_trait]
impl AccountService for FixtureAccountService {
    async fn register(
        &self,
        _request: RegisterRequest,
    ) -> Result<AuthenticatedAccount, DomainError> {
        Ok(AuthenticatedAccount {
            user: fixture_user(UserId::random())?,
            token: "fixture-token".to_owned(),
        })
    }

    async fn login(&self, _request: LoginRequest) -> Result<AuthenticatedAccount, DomainError> {
        Ok(AuthenticatedAccount {
            user: fixture_user(UserId::random())?,
            token: "fixture-token".to_owned(),
        })
    }

    async fn current_user(&self, user_id: &UserId) -> Result<User, DomainError> {
        fixture_user(*user_id)
    }
}
