//! Domain model and services for the grill showcase.
//!
//! Purpose: Define strongly typed entities, the driving and driven ports,
//! and the services that orchestrate them. Keep types immutable where
//! practical and document invariants and serialisation contracts (serde)
//! in each type's Rustdoc.
//!
//! Public surface:
//! - `DomainError` / `ErrorCode` / `FieldError`: service failure payloads.
//! - `User`, `Grill` and their draft types: validated aggregates.
//! - `Principal`: the authenticated caller derived from a token.
//! - `CredentialAccountService`, `GrillCommandService` and
//!   `GrillQueryService`: port implementations wired by the server.

pub mod account_service;
pub mod engagement;
pub mod error;
pub mod grill;
pub mod grill_service;
pub mod policy;
pub mod ports;
pub mod ranking;
pub mod user;

pub use self::account_service::{CredentialAccountService, INVALID_CREDENTIALS, PASSWORD_MIN_LEN};
pub use self::engagement::GrillLocks;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode, FieldError};
pub use self::grill::{Grill, GrillDraft, GrillEdit, GrillId, GrillValidationError};
pub use self::grill_service::{
    ACCESS_FORBIDDEN, DESCRIPTION_MIN_LEN, GRILL_NOT_FOUND, GrillCommandService,
    GrillQueryService, TITLE_MIN_LEN,
};
pub use self::ranking::{InvalidSortMode, SortMode};
pub use self::user::{
    EmailAddress, Principal, Role, User, UserDraft, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, DomainError};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(DomainError::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, DomainError>;
