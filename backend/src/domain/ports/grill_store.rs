//! Port abstraction for grill persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Grill, GrillId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by grill store adapters.
    pub enum GrillStoreError {
        /// The addressed grill does not exist.
        NotFound => "grill not found",
        /// Query or mutation failed inside the adapter.
        Storage { message: String } => "grill store failed: {message}",
    }
}

/// Port for writing and reading grills.
///
/// Deliberately a whole-entity CRUD surface; vote arithmetic stays in the
/// domain so adapters never need to understand the voter set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GrillStore: Send + Sync {
    /// Persist a new grill.
    async fn insert(&self, grill: &Grill) -> Result<(), GrillStoreError>;

    /// Fetch a grill by identifier.
    async fn find_by_id(&self, id: &GrillId) -> Result<Option<Grill>, GrillStoreError>;

    /// Read every stored grill in unspecified order.
    async fn list_all(&self) -> Result<Vec<Grill>, GrillStoreError>;

    /// Read the grills owned by one user in unspecified order.
    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Grill>, GrillStoreError>;

    /// Replace a stored grill with this version.
    async fn update(&self, grill: &Grill) -> Result<(), GrillStoreError>;

    /// Remove a grill.
    async fn delete(&self, id: &GrillId) -> Result<(), GrillStoreError>;
}

/// Fixture implementation for tests that do not exercise grill persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGrillStore;

#[async_trait]
impl GrillStore for FixtureGrillStore {
    async fn insert(&self, _grill: &Grill) -> Result<(), GrillStoreError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &GrillId) -> Result<Option<Grill>, GrillStoreError> {
        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<Grill>, GrillStoreError> {
        Ok(Vec::new())
    }

    async fn list_by_owner(&self, _owner_id: &UserId) -> Result<Vec<Grill>, GrillStoreError> {
        Ok(Vec::new())
    }

    async fn update(&self, _grill: &Grill) -> Result<(), GrillStoreError> {
        Err(GrillStoreError::not_found())
    }

    async fn delete(&self, _id: &GrillId) -> Result<(), GrillStoreError> {
        Err(GrillStoreError::not_found())
    }
}
