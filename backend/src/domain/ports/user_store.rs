//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user store adapters.
    pub enum UserStoreError {
        /// Another account already holds this canonical email.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// Query or mutation failed inside the adapter.
        Storage { message: String } => "user store failed: {message}",
    }
}

/// Port for writing and reading registered accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new account, enforcing case-insensitive email uniqueness.
    async fn insert(&self, user: &User) -> Result<(), UserStoreError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError>;

    /// Fetch an account by canonical email.
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<User>, UserStoreError>;
}

/// Fixture implementation for tests that do not exercise user persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserStore;

#[async_trait]
impl UserStore for FixtureUserStore {
    async fn insert(&self, _user: &User) -> Result<(), UserStoreError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserStoreError> {
        Ok(None)
    }

    async fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<User>, UserStoreError> {
        Ok(None)
    }
}
