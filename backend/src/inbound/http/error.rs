//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and
//! status codes. The wire envelope is `{ "message": ..., "errors": [...] }`
//! with `errors` present only for field-level validation failures.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{DomainError, ErrorCode, FieldError};
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DomainError>;

/// JSON envelope for every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable summary of the failure.
    pub message: String,
    /// Per-field validation failures, omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl From<&DomainError> for ErrorBody {
    fn from(error: &DomainError) -> Self {
        let errors = if error.field_errors().is_empty() {
            None
        } else {
            Some(error.field_errors().to_vec())
        };
        Self {
            message: error.message().to_owned(),
            errors,
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn envelope_for(error: &DomainError) -> ErrorBody {
    if matches!(error.code(), ErrorCode::InternalError) {
        // Log the detail server-side; clients get a generic message.
        if let Some(trace_id) = TraceId::current() {
            error!(%trace_id, detail = %error.message(), "internal error surfaced to client");
        } else {
            error!(detail = %error.message(), "internal error surfaced to client");
        }
        ErrorBody {
            message: "Internal server error".to_owned(),
            errors: None,
        }
    } else {
        ErrorBody::from(error)
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(envelope_for(self))
    }
}
