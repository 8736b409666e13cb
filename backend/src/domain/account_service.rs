//! Account domain service: registration, login, and profile reads.
//!
//! Implements the [`AccountService`] driving port over the user store,
//! password hasher, and token service driven ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    AccountService, AuthenticatedAccount, LoginRequest, PasswordHasher, PasswordHasherError,
    RegisterRequest, TokenService, TokenServiceError, UserStore, UserStoreError,
};
use crate::domain::{
    DomainError, EmailAddress, FieldError, Role, User, UserDraft, UserId,
};

/// Message returned for every credential failure on login.
///
/// Unknown email and wrong password are indistinguishable on the wire.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Well-formed hash verified against when the email is unknown, so the
/// reject path does comparable work either way.
const DECOY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$\
c29tZXNhbHRzb21lc2FsdA$Zm9yYmlkZGVuLWJ5LWNvbnN0cnVjdGlvbg";

fn map_store_error(error: UserStoreError) -> DomainError {
    match error {
        UserStoreError::DuplicateEmail { .. } => {
            DomainError::conflict("Email already registered")
        }
        UserStoreError::Storage { message } => {
            DomainError::internal(format!("user store error: {message}"))
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> DomainError {
    let PasswordHasherError::Hashing { message } = error;
    DomainError::internal(format!("password hashing error: {message}"))
}

fn map_token_error(error: TokenServiceError) -> DomainError {
    DomainError::internal(format!("token issuing error: {error}"))
}

/// Collapse an optional free-form input to `None` when blank.
fn normalise_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Validate registration input, collecting every failing field.
fn validate_registration(request: &RegisterRequest) -> Result<EmailAddress, Vec<FieldError>> {
    let mut errors = Vec::new();

    if request.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }

    let email = match EmailAddress::new(&request.email) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.push(FieldError::new("email", "Email is invalid"));
            None
        }
    };

    if request.password.chars().count() < PASSWORD_MIN_LEN {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {PASSWORD_MIN_LEN} characters"),
        ));
    }

    if request.password != request.confirm_password {
        errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
    }

    match (email, errors.is_empty()) {
        (Some(email), true) => Ok(email),
        (_, _) => Err(errors),
    }
}

/// Validate login input, collecting every failing field.
fn validate_login(request: &LoginRequest) -> Result<EmailAddress, Vec<FieldError>> {
    let mut errors = Vec::new();

    let email = match EmailAddress::new(&request.email) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.push(FieldError::new("email", "Email is invalid"));
            None
        }
    };

    if request.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    match (email, errors.is_empty()) {
        (Some(email), true) => Ok(email),
        (_, _) => Err(errors),
    }
}

/// Account service backed by credential verification and signed tokens.
#[derive(Clone)]
pub struct CredentialAccountService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, H, T> CredentialAccountService<U, H, T> {
    /// Create a new account service over its driven ports.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<U, H, T> CredentialAccountService<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenService,
{
    fn issue_for(&self, user: &User) -> Result<AuthenticatedAccount, DomainError> {
        let token = self
            .tokens
            .issue(user.id(), user.role())
            .map_err(map_token_error)?;
        Ok(AuthenticatedAccount {
            user: user.clone(),
            token,
        })
    }
}

#[async_trait]
impl<U, H, T> AccountService for CredentialAccountService<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenService,
{
    async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<AuthenticatedAccount, DomainError> {
        let email = validate_registration(&request).map_err(DomainError::validation)?;

        if self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_store_error)?
            .is_some()
        {
            return Err(DomainError::conflict("Email already registered"));
        }

        let password_hash = self
            .hasher
            .hash(&request.password)
            .await
            .map_err(map_hasher_error)?;

        let user = User::new(UserDraft {
            id: UserId::random(),
            name: request.name.trim().to_owned(),
            email,
            phone: normalise_optional(request.phone),
            password_hash,
            role: Role::User,
            created_at: self.clock.utc(),
        })
        .map_err(|err| DomainError::internal(format!("validated draft rejected: {err}")))?;

        // A racing registration can still hit the store's uniqueness
        // check; it maps to the same conflict as the pre-check.
        self.users.insert(&user).await.map_err(map_store_error)?;

        self.issue_for(&user)
    }

    async fn login(&self, request: LoginRequest) -> Result<AuthenticatedAccount, DomainError> {
        let email = validate_login(&request).map_err(DomainError::validation)?;

        let found = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_store_error)?;

        let Some(user) = found else {
            self.hasher
                .verify(&request.password, DECOY_PASSWORD_HASH)
                .await
                .ok();
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(&request.password, user.password_hash())
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
        }

        self.issue_for(&user)
    }

    async fn current_user(&self, user_id: &UserId) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| DomainError::not_found("User not found"))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
