//! In-memory `UserStore` adapter backed by `RwLock`-guarded maps.
//!
//! Accounts live in a map keyed by id, with a second map from canonical
//! email to id so uniqueness checks and login lookups stay O(1). Email
//! canonicalisation happens in the domain; this adapter only ever sees
//! lowercased addresses.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{EmailAddress, User, UserId};

const LOCK_POISONED: &str = "user store lock poisoned";

#[derive(Debug, Default)]
struct UserMaps {
    by_id: HashMap<UserId, User>,
    id_by_email: HashMap<String, UserId>,
}

/// Process-local user store.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<UserMaps>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_maps(&self) -> Result<RwLockReadGuard<'_, UserMaps>, UserStoreError> {
        self.inner
            .read()
            .map_err(|_| UserStoreError::storage(LOCK_POISONED))
    }

    fn write_maps(&self) -> Result<RwLockWriteGuard<'_, UserMaps>, UserStoreError> {
        self.inner
            .write()
            .map_err(|_| UserStoreError::storage(LOCK_POISONED))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut maps = self.write_maps()?;
        let email = user.email().as_str().to_owned();
        if maps.id_by_email.contains_key(&email) {
            return Err(UserStoreError::duplicate_email(email));
        }
        maps.id_by_email.insert(email, *user.id());
        maps.by_id.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        Ok(self.read_maps()?.by_id.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserStoreError> {
        let maps = self.read_maps()?;
        Ok(maps
            .id_by_email
            .get(email.as_str())
            .and_then(|id| maps.by_id.get(id))
            .cloned())
    }
}
