//! Grill domain services implementing the command and query driving ports.
//!
//! Mutations run load, authorise, validate, mutate, then denormalise the
//! owner for the response, failing fast before any state changes. Reads
//! filter and rank in memory and attach the owner in a second lookup.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::engagement::GrillLocks;
use crate::domain::ports::{
    CreateGrillRequest, GrillCommand, GrillListing, GrillQuery, GrillStore, GrillStoreError,
    GrillView, LeaderboardEntry, LikeOutcome, ListGrillsRequest, UpdateGrillRequest, UserStore,
    UserStoreError,
};
use crate::domain::{
    DomainError, FieldError, Grill, GrillDraft, GrillEdit, GrillId, Principal, User, UserId,
    policy, ranking,
};

/// Minimum accepted title length, in characters.
pub const TITLE_MIN_LEN: usize = 3;
/// Minimum accepted description length, in characters.
pub const DESCRIPTION_MIN_LEN: usize = 10;

/// Message returned when a grill id does not resolve.
pub const GRILL_NOT_FOUND: &str = "Grill not found";
/// Message returned when the principal may not mutate the grill.
pub const ACCESS_FORBIDDEN: &str = "Access forbidden";

fn map_grill_store_error(error: GrillStoreError) -> DomainError {
    match error {
        GrillStoreError::NotFound => DomainError::not_found(GRILL_NOT_FOUND),
        GrillStoreError::Storage { message } => {
            DomainError::internal(format!("grill store error: {message}"))
        }
    }
}

fn map_user_store_error(error: UserStoreError) -> DomainError {
    DomainError::internal(format!("user store error: {error}"))
}

fn title_too_short() -> FieldError {
    FieldError::new(
        "title",
        format!("Title must be at least {TITLE_MIN_LEN} characters"),
    )
}

fn description_too_short() -> FieldError {
    FieldError::new(
        "description",
        format!("Description must be at least {DESCRIPTION_MIN_LEN} characters"),
    )
}

/// Validate creation input, collecting every failing field.
fn validate_create(request: &CreateGrillRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if request.title.trim().chars().count() < TITLE_MIN_LEN {
        errors.push(title_too_short());
    }
    if request.description.trim().chars().count() < DESCRIPTION_MIN_LEN {
        errors.push(description_too_short());
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate update input; absent fields are not checked.
fn validate_update(request: &UpdateGrillRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if let Some(title) = request.title.as_deref()
        && title.trim().chars().count() < TITLE_MIN_LEN
    {
        errors.push(title_too_short());
    }
    if let Some(description) = request.description.as_deref()
        && description.trim().chars().count() < DESCRIPTION_MIN_LEN
    {
        errors.push(description_too_short());
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn authorise(principal: &Principal, grill: &Grill) -> Result<(), DomainError> {
    if policy::can_mutate(principal, grill) {
        Ok(())
    } else {
        Err(DomainError::forbidden(ACCESS_FORBIDDEN))
    }
}

/// Grill service implementing the mutation driving port.
#[derive(Clone)]
pub struct GrillCommandService<G, U> {
    grills: Arc<G>,
    users: Arc<U>,
    locks: Arc<GrillLocks>,
    clock: Arc<dyn Clock>,
}

impl<G, U> GrillCommandService<G, U> {
    /// Create a new command service over the grill and user stores.
    pub fn new(grills: Arc<G>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            grills,
            users,
            locks: Arc::new(GrillLocks::new()),
            clock,
        }
    }
}

impl<G, U> GrillCommandService<G, U>
where
    G: GrillStore,
    U: UserStore,
{
    async fn load_existing(&self, id: &GrillId) -> Result<Grill, DomainError> {
        self.grills
            .find_by_id(id)
            .await
            .map_err(map_grill_store_error)?
            .ok_or_else(|| DomainError::not_found(GRILL_NOT_FOUND))
    }

    async fn owner_of(&self, owner_id: &UserId) -> Result<Option<User>, DomainError> {
        self.users
            .find_by_id(owner_id)
            .await
            .map_err(map_user_store_error)
    }

    async fn project_for(
        &self,
        grill: &Grill,
        viewer: &UserId,
    ) -> Result<GrillView, DomainError> {
        let owner = self.owner_of(grill.owner_id()).await?;
        Ok(GrillView::project(grill, owner.as_ref(), Some(viewer)))
    }
}

#[async_trait]
impl<G, U> GrillCommand for GrillCommandService<G, U>
where
    G: GrillStore,
    U: UserStore,
{
    async fn create(
        &self,
        principal: &Principal,
        request: CreateGrillRequest,
    ) -> Result<GrillView, DomainError> {
        validate_create(&request).map_err(DomainError::validation)?;

        let grill = Grill::new(GrillDraft {
            id: GrillId::random(),
            title: request.title.trim().to_owned(),
            description: request.description.trim().to_owned(),
            image_ref: request.image_ref,
            owner_id: principal.user_id,
            created_at: self.clock.utc(),
        })
        .map_err(|err| DomainError::internal(format!("validated draft rejected: {err}")))?;

        self.grills
            .insert(&grill)
            .await
            .map_err(map_grill_store_error)?;

        self.project_for(&grill, &principal.user_id).await
    }

    async fn update(
        &self,
        principal: &Principal,
        id: &GrillId,
        request: UpdateGrillRequest,
    ) -> Result<GrillView, DomainError> {
        let mut grill = self.load_existing(id).await?;
        authorise(principal, &grill)?;
        validate_update(&request).map_err(DomainError::validation)?;

        let edit = GrillEdit {
            title: request.title.map(|t| t.trim().to_owned()),
            description: request.description.map(|d| d.trim().to_owned()),
            image_ref: request.image_ref,
        };
        grill
            .apply_edit(edit, self.clock.utc())
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;

        self.grills
            .update(&grill)
            .await
            .map_err(map_grill_store_error)?;

        self.project_for(&grill, &principal.user_id).await
    }

    async fn delete(&self, principal: &Principal, id: &GrillId) -> Result<(), DomainError> {
        let grill = self.load_existing(id).await?;
        authorise(principal, &grill)?;

        self.grills
            .delete(id)
            .await
            .map_err(map_grill_store_error)?;
        self.locks.forget(id);
        Ok(())
    }

    async fn toggle_like(
        &self,
        principal: &Principal,
        id: &GrillId,
    ) -> Result<LikeOutcome, DomainError> {
        // Hold the per-grill lock across the whole read-modify-write so
        // concurrent toggles queue instead of overwriting each other.
        let _guard = self.locks.acquire(*id).await;

        let mut grill = self.load_existing(id).await?;
        let liked = grill.toggle_vote(principal.user_id, self.clock.utc());
        self.grills
            .update(&grill)
            .await
            .map_err(map_grill_store_error)?;

        Ok(LikeOutcome {
            id: *grill.id(),
            likes_count: grill.likes_count(),
            liked_by_current_user: liked,
        })
    }
}

/// Grill service implementing the read driving port.
#[derive(Clone)]
pub struct GrillQueryService<G, U> {
    grills: Arc<G>,
    users: Arc<U>,
}

impl<G, U> GrillQueryService<G, U> {
    /// Create a new query service over the grill and user stores.
    pub fn new(grills: Arc<G>, users: Arc<U>) -> Self {
        Self { grills, users }
    }
}

impl<G, U> GrillQueryService<G, U>
where
    G: GrillStore,
    U: UserStore,
{
    /// Load each distinct owner once for a batch of grills.
    async fn resolve_owners(
        &self,
        grills: &[Grill],
    ) -> Result<HashMap<UserId, User>, DomainError> {
        let mut owners = HashMap::new();
        for grill in grills {
            let owner_id = *grill.owner_id();
            if owners.contains_key(&owner_id) {
                continue;
            }
            if let Some(user) = self
                .users
                .find_by_id(&owner_id)
                .await
                .map_err(map_user_store_error)?
            {
                owners.insert(owner_id, user);
            }
        }
        Ok(owners)
    }

    async fn project_listing(
        &self,
        grills: Vec<Grill>,
        viewer: Option<UserId>,
    ) -> Result<GrillListing, DomainError> {
        let owners = self.resolve_owners(&grills).await?;
        let total = grills.len();
        let items = grills
            .iter()
            .map(|grill| GrillView::project(grill, owners.get(grill.owner_id()), viewer.as_ref()))
            .collect();
        Ok(GrillListing { items, total })
    }
}

#[async_trait]
impl<G, U> GrillQuery for GrillQueryService<G, U>
where
    G: GrillStore,
    U: UserStore,
{
    async fn list(
        &self,
        viewer: Option<UserId>,
        request: ListGrillsRequest,
    ) -> Result<GrillListing, DomainError> {
        let mut grills = self
            .grills
            .list_all()
            .await
            .map_err(map_grill_store_error)?;

        if let Some(query) = request.query.as_deref() {
            grills.retain(|grill| ranking::matches_query(grill, query));
        }
        ranking::sort_grills(&mut grills, request.sort);

        self.project_listing(grills, viewer).await
    }

    async fn leaderboard(
        &self,
        limit: Option<i64>,
    ) -> Result<Vec<LeaderboardEntry>, DomainError> {
        let grills = self
            .grills
            .list_all()
            .await
            .map_err(map_grill_store_error)?;

        let board = ranking::top_n(grills, ranking::clamp_leaderboard_limit(limit));
        let owners = self.resolve_owners(&board).await?;
        Ok(board
            .iter()
            .map(|grill| LeaderboardEntry::project(grill, owners.get(grill.owner_id())))
            .collect())
    }

    async fn mine(&self, viewer: &UserId) -> Result<GrillListing, DomainError> {
        let mut grills = self
            .grills
            .list_by_owner(viewer)
            .await
            .map_err(map_grill_store_error)?;
        ranking::sort_grills(&mut grills, ranking::SortMode::New);

        self.project_listing(grills, Some(*viewer)).await
    }

    async fn get(
        &self,
        viewer: Option<UserId>,
        id: &GrillId,
    ) -> Result<GrillView, DomainError> {
        let grill = self
            .grills
            .find_by_id(id)
            .await
            .map_err(map_grill_store_error)?
            .ok_or_else(|| DomainError::not_found(GRILL_NOT_FOUND))?;

        let owner = self
            .users
            .find_by_id(grill.owner_id())
            .await
            .map_err(map_user_store_error)?;
        Ok(GrillView::project(&grill, owner.as_ref(), viewer.as_ref()))
    }
}

#[cfg(test)]
#[path = "grill_service_tests.rs"]
mod tests;
