//! Port abstraction for password hashing adapters.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hashing or verification could not run.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Port for one-way password hashing and verification.
///
/// Implementations produce PHC-format hash strings. Verification reports a
/// mismatch as `Ok(false)`, reserving the error path for operational
/// failures so callers cannot confuse the two.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password into a PHC string.
    async fn hash(&self, password: &str) -> Result<String, PasswordHasherError>;

    /// Check a raw password against a stored PHC string.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHasherError>;
}

/// Fixture hasher for tests that do not exercise credentials.
///
/// "Hashes" by reversing the input, and verifies accordingly. Obviously
/// not for production wiring.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

#[async_trait]
impl PasswordHasher for FixturePasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        Ok(password.chars().rev().collect())
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHasherError> {
        let rehashed: String = password.chars().rev().collect();
        Ok(rehashed == hash)
    }
}
