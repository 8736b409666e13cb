//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the wire shape produced by the error adapter
//! but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::FieldError`].
///
/// A single field-level validation failure.
#[derive(ToSchema)]
#[schema(as = crate::domain::FieldError)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldErrorSchema {
    /// Wire name of the offending field.
    #[schema(example = "email")]
    field: String,
    /// Human-readable description of the failure.
    #[schema(example = "Email is invalid")]
    message: String,
}

/// OpenAPI schema for the error envelope built from
/// [`crate::domain::DomainError`].
///
/// Every non-2xx response carries this payload. The `errors` list is only
/// present on validation failures.
#[derive(ToSchema)]
#[schema(as = crate::domain::DomainError)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message returned to clients.
    #[schema(example = "Validation failed")]
    message: String,
    /// Field-level failures, present only when validation rejected the
    /// request.
    errors: Option<Vec<FieldErrorSchema>>,
}
