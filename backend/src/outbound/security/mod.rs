//! Credential and token adapters.
//!
//! Concrete implementations of the `PasswordHasher` and `TokenService`
//! ports. Like the persistence adapters these contain no business rules;
//! the account service decides what a rejection means.

mod argon2_password_hasher;
mod jwt_token_service;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_token_service::{JwtTokenService, TOKEN_TTL_DAYS};
