//! Bearer-token identity extractors.
//!
//! Keep the HTTP handlers free of header parsing by deriving the caller's
//! [`Principal`] straight from the `Authorization` header. Every failure
//! mode (missing header, wrong shape, bad token) collapses into one
//! generic 401 so the wire never reveals why authentication failed; the
//! concrete cause is logged at debug level.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{DomainError, Principal};
use crate::inbound::http::state::HttpState;

/// Literal scheme expected in the `Authorization` header.
const BEARER_SCHEME: &str = "Bearer";

/// Message returned for every authentication failure.
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";

/// Message returned when an authenticated caller lacks the admin role.
pub const ADMIN_REQUIRED: &str = "Admin access required";

fn unauthenticated() -> DomainError {
    DomainError::unauthorized(AUTHENTICATION_REQUIRED)
}

/// Parse `Bearer <token>` and verify it against the configured service.
///
/// The header must split on whitespace into exactly two parts with the
/// first literally `Bearer`; anything else is rejected before the token
/// itself is inspected.
fn bearer_principal(req: &HttpRequest) -> Result<Principal, DomainError> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| DomainError::internal("http state is not registered"))?;

    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(unauthenticated)?
        .to_str()
        .map_err(|_| unauthenticated())?;

    let mut parts = value.split_whitespace();
    let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => return Err(unauthenticated()),
    };
    if scheme != BEARER_SCHEME {
        return Err(unauthenticated());
    }

    state.tokens.verify(token).map_err(|error| {
        debug!(%error, "bearer token rejected");
        unauthenticated()
    })
}

impl FromRequest for Principal {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(bearer_principal(req))
    }
}

/// Optional identity for routes that serve anonymous callers too.
///
/// An absent header yields an anonymous request; a header that is present
/// but invalid is still a hard 401 rather than a silent downgrade.
#[derive(Debug, Clone, Copy)]
pub struct MaybePrincipal(pub Option<Principal>);

impl MaybePrincipal {
    /// The viewer's user id, if authenticated.
    pub fn viewer(&self) -> Option<crate::domain::UserId> {
        self.0.map(|principal| principal.user_id)
    }
}

impl FromRequest for MaybePrincipal {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if req.headers().get(header::AUTHORIZATION).is_none() {
            return ready(Ok(Self(None)));
        }
        ready(bearer_principal(req).map(|principal| Self(Some(principal))))
    }
}

/// Identity restricted to administrators.
///
/// Authentication runs first, so a bad token is still a 401; only an
/// authenticated non-admin sees the 403.
#[derive(Debug, Clone, Copy)]
pub struct AdminPrincipal(pub Principal);

impl FromRequest for AdminPrincipal {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(bearer_principal(req).and_then(|principal| {
            if principal.role.is_admin() {
                Ok(Self(principal))
            } else {
                Err(DomainError::forbidden(ADMIN_REQUIRED))
            }
        }))
    }
}
