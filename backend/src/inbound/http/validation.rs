//! Shared wire-level parsing helpers for inbound HTTP adapters.
//!
//! Field-level validation of request bodies lives in the domain services;
//! these helpers only turn raw path and query fragments into domain types
//! with the status semantics the API promises.

use std::str::FromStr;

use uuid::Uuid;

use crate::domain::{DomainError, FieldError, GRILL_NOT_FOUND, GrillId, SortMode};

/// Parse a path fragment into a grill id.
///
/// A malformed UUID is indistinguishable from a missing grill, so both
/// surface as the same 404.
pub(crate) fn parse_grill_id(raw: &str) -> Result<GrillId, DomainError> {
    Uuid::parse_str(raw)
        .map(GrillId::from_uuid)
        .map_err(|_| DomainError::not_found(GRILL_NOT_FOUND))
}

/// Parse the optional `sort` query parameter.
pub(crate) fn parse_sort_mode(raw: Option<&str>) -> Result<SortMode, DomainError> {
    match raw {
        None => Ok(SortMode::default()),
        Some(value) => SortMode::from_str(value).map_err(|_| {
            DomainError::validation(vec![FieldError::new(
                "sort",
                "Sort must be one of: new, top",
            )])
        }),
    }
}

/// Parse the optional leaderboard `limit` query parameter.
///
/// Range clamping happens in the ranking engine; this only rejects values
/// that are not integers at all.
pub(crate) fn parse_leaderboard_limit(raw: Option<&str>) -> Result<Option<i64>, DomainError> {
    match raw {
        None => Ok(None),
        Some(value) => value.parse::<i64>().map(Some).map_err(|_| {
            DomainError::validation(vec![FieldError::new("limit", "Limit must be an integer")])
        }),
    }
}
