//! HS256 JWT-backed `TokenService` adapter.
//!
//! Tokens carry `sub`, `role`, `iat` and `exp` claims and live for seven
//! days from issue. Issue time comes from the injected clock so expiry is
//! testable; verification applies zero leeway, so an expired token is
//! rejected the second its lifetime lapses.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenService, TokenServiceError};
use crate::domain::{Principal, Role, UserId};

/// Token lifetime in days.
pub const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: Role,
    iat: i64,
    exp: i64,
}

/// Token service signing and verifying HS256 JWTs with a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Create a service around a shared secret and a clock for issue times.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }
}

fn map_decode_error(error: &jsonwebtoken::errors::Error) -> TokenServiceError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenServiceError::expired(),
        ErrorKind::InvalidSignature => TokenServiceError::bad_signature(),
        _ => TokenServiceError::malformed(),
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: &UserId, role: Role) -> Result<String, TokenServiceError> {
        let issued_at = self.clock.utc();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| TokenServiceError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Principal, TokenServiceError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| map_decode_error(&err))?;
        let id = data
            .claims
            .sub
            .parse::<uuid::Uuid>()
            .map_err(|_| TokenServiceError::malformed())?;
        Ok(Principal::new(UserId::from_uuid(id), data.claims.role))
    }
}
