//! Argon2id-backed `PasswordHasher` adapter.
//!
//! Hashing runs on the blocking pool because a single Argon2 pass is
//! deliberately slow; keeping it off the async workers stops credential
//! traffic from stalling unrelated requests.

use argon2::Argon2;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    rand_core::OsRng,
};
use async_trait::async_trait;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Password hasher producing PHC-format Argon2id strings.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher {
    inner: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Create a hasher with the library's recommended parameters.
    pub fn new() -> Self {
        Self::default()
    }
}

fn task_failed(err: tokio::task::JoinError) -> PasswordHasherError {
    PasswordHasherError::hashing(format!("blocking task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        let hasher = self.inner.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            hasher
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| PasswordHasherError::hashing(err.to_string()))
        })
        .await
        .map_err(task_failed)?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHasherError> {
        let hasher = self.inner.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&hash)
                .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
            match hasher.verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(HashError::Password) => Ok(false),
                Err(err) => Err(PasswordHasherError::hashing(err.to_string())),
            }
        })
        .await
        .map_err(task_failed)?
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for PHC output and the mismatch/error split.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn hashes_verify_and_embed_a_fresh_salt() {
        let hasher = Argon2PasswordHasher::new();

        let first = hasher.hash("secret123").await.expect("hashing runs");
        let second = hasher.hash("secret123").await.expect("hashing runs");

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second, "salts must differ between hashes");
        assert!(
            hasher
                .verify("secret123", &first)
                .await
                .expect("verification runs")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn mismatches_are_false_not_errors() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("secret123").await.expect("hashing runs");

        let matched = hasher
            .verify("wrong-password", &hash)
            .await
            .expect("verification runs");

        assert!(!matched);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_stored_hashes_error_instead_of_rejecting() {
        let hasher = Argon2PasswordHasher::new();

        let result = hasher.verify("secret123", "not-a-phc-string").await;

        assert!(matches!(result, Err(PasswordHasherError::Hashing { .. })));
    }
}
