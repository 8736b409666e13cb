//! In-memory `GrillStore` adapter backed by a `RwLock`-guarded map.
//!
//! Stores whole aggregates keyed by id. Ordering is left unspecified on
//! purpose; ranking happens in the domain after the read.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{GrillStore, GrillStoreError};
use crate::domain::{Grill, GrillId, UserId};

const LOCK_POISONED: &str = "grill store lock poisoned";

/// Process-local grill store.
#[derive(Debug, Default)]
pub struct InMemoryGrillStore {
    inner: RwLock<HashMap<GrillId, Grill>>,
}

impl InMemoryGrillStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_map(&self) -> Result<RwLockReadGuard<'_, HashMap<GrillId, Grill>>, GrillStoreError> {
        self.inner
            .read()
            .map_err(|_| GrillStoreError::storage(LOCK_POISONED))
    }

    fn write_map(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<GrillId, Grill>>, GrillStoreError> {
        self.inner
            .write()
            .map_err(|_| GrillStoreError::storage(LOCK_POISONED))
    }
}

#[async_trait]
impl GrillStore for InMemoryGrillStore {
    async fn insert(&self, grill: &Grill) -> Result<(), GrillStoreError> {
        self.write_map()?.insert(*grill.id(), grill.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &GrillId) -> Result<Option<Grill>, GrillStoreError> {
        Ok(self.read_map()?.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Grill>, GrillStoreError> {
        Ok(self.read_map()?.values().cloned().collect())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Grill>, GrillStoreError> {
        Ok(self
            .read_map()?
            .values()
            .filter(|grill| grill.owner_id() == owner_id)
            .cloned()
            .collect())
    }

    async fn update(&self, grill: &Grill) -> Result<(), GrillStoreError> {
        match self.write_map()?.entry(*grill.id()) {
            Entry::Occupied(mut slot) => {
                slot.insert(grill.clone());
                Ok(())
            }
            Entry::Vacant(_) => Err(GrillStoreError::not_found()),
        }
    }

    async fn delete(&self, id: &GrillId) -> Result<(), GrillStoreError> {
        match self.write_map()?.remove(id) {
            Some(_) => Ok(()),
            None => Err(GrillStoreError::not_found()),
        }
    }
}
