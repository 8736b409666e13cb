//! Per-grill serialisation of vote toggles.
//!
//! The grill store is a plain load/update surface, so a toggle is a
//! read-modify-write spanning two port calls. This registry hands out one
//! async mutex per grill id; holding it for the whole critical section
//! means concurrent toggles on the same grill queue up instead of
//! clobbering each other, while toggles on different grills proceed in
//! parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;

use crate::domain::GrillId;

/// Registry of per-grill async locks.
#[derive(Debug, Default)]
pub struct GrillLocks {
    locks: Mutex<HashMap<GrillId, Arc<tokio::sync::Mutex<()>>>>,
}

impl GrillLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one grill, creating it on first use.
    ///
    /// The guard owns the underlying mutex, so it may be held across
    /// `.await` points for the full load-toggle-save sequence.
    pub async fn acquire(&self, id: GrillId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut table = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(table.entry(id).or_default())
        };
        lock.lock_owned().await
    }

    /// Drop the lock entry for a grill that no longer exists.
    ///
    /// In-flight guards keep the mutex alive through their own `Arc`;
    /// this only stops the table growing with deleted grills.
    pub fn forget(&self, id: &GrillId) {
        let mut table = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        table.remove(id);
    }
}
