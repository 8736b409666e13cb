//! Driving port for grill mutations.
//!
//! Every operation takes the acting principal explicitly; there is no
//! ambient identity. Mutations follow load, authorise, validate, mutate,
//! and return the freshly denormalised projection.

use async_trait::async_trait;

use crate::domain::{DomainError, GrillId, Principal};

use super::grill_view::{GrillView, LikeOutcome};

/// Raw creation input as received from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGrillRequest {
    pub title: String,
    pub description: String,
    pub image_ref: Option<String>,
}

/// Raw update input; absent fields leave the grill untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateGrillRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_ref: Option<String>,
}

/// Domain use-case port for grill mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GrillCommand: Send + Sync {
    /// Create a grill owned by the principal.
    async fn create(
        &self,
        principal: &Principal,
        request: CreateGrillRequest,
    ) -> Result<GrillView, DomainError>;

    /// Edit a grill the principal owns or moderates.
    async fn update(
        &self,
        principal: &Principal,
        id: &GrillId,
        request: UpdateGrillRequest,
    ) -> Result<GrillView, DomainError>;

    /// Remove a grill the principal owns or moderates.
    async fn delete(&self, principal: &Principal, id: &GrillId) -> Result<(), DomainError>;

    /// Flip the principal's like on a grill.
    async fn toggle_like(
        &self,
        principal: &Principal,
        id: &GrillId,
    ) -> Result<LikeOutcome, DomainError>;
}

/// Fixture implementation treating every grill as absent.
pub struct FixtureGrillCommand;

#[async_trait]
impl GrillCommand for FixtureGrillCommand {
    async fn create(
        &self,
        _principal: &Principal,
        _request: CreateGrillRequest,
    ) -> Result<GrillView, DomainError> {
        Err(DomainError::internal("fixture grill command cannot create"))
    }

    async fn update(
        &self,
        _principal: &Principal,
        _id: &GrillId,
        _request: UpdateGrillRequest,
    ) -> Result<GrillView, DomainError> {
        Err(DomainError::not_found("Grill not found"))
    }

    async fn delete(&self, _principal: &Principal, _id: &GrillId) -> Result<(), DomainError> {
        Err(DomainError::not_found("Grill not found"))
    }

    async fn toggle_like(
        &self,
        _principal: &Principal,
        _id: &GrillId,
    ) -> Result<LikeOutcome, DomainError> {
        Err(DomainError::not_found("Grill not found"))
    }
}
