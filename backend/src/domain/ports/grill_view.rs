//! Read-model payloads shared by the grill driving ports.
//!
//! Projections are built from the aggregate plus a separately loaded
//! owner. The like count is always derived from the voter set at
//! projection time, and the payloads structurally cannot carry password
//! material.

use chrono::{DateTime, Utc};

use crate::domain::{Grill, GrillId, User, UserId};

/// Name substituted when a grill's owner no longer resolves.
pub const DELETED_OWNER_NAME: &str = "[deleted]";

/// Owner details embedded in the full grill projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl OwnerSummary {
    /// Denormalise an owner, falling back to a placeholder when the user
    /// record has vanished.
    pub fn resolve(owner_id: UserId, owner: Option<&User>) -> Self {
        owner.map_or_else(
            || Self {
                id: owner_id,
                name: DELETED_OWNER_NAME.to_owned(),
                email: String::new(),
            },
            |user| Self {
                id: *user.id(),
                name: user.name().to_owned(),
                email: user.email().as_str().to_owned(),
            },
        )
    }
}

/// Full grill projection returned by reads and successful mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrillView {
    pub id: GrillId,
    pub title: String,
    pub description: String,
    pub image_ref: Option<String>,
    pub likes_count: usize,
    pub liked_by_current_user: bool,
    pub owner: OwnerSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GrillView {
    /// Project a grill for a viewer, deriving the like fields from the
    /// voter set.
    ///
    /// Anonymous viewers never see `liked_by_current_user` as true.
    pub fn project(grill: &Grill, owner: Option<&User>, viewer: Option<&UserId>) -> Self {
        Self {
            id: *grill.id(),
            title: grill.title().to_owned(),
            description: grill.description().to_owned(),
            image_ref: grill.image_ref().map(str::to_owned),
            likes_count: grill.likes_count(),
            liked_by_current_user: viewer.is_some_and(|v| grill.is_liked_by(v)),
            owner: OwnerSummary::resolve(*grill.owner_id(), owner),
            created_at: grill.created_at(),
            updated_at: grill.updated_at(),
        }
    }
}

/// Filtered listing plus its total, as returned by the list reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrillListing {
    pub items: Vec<GrillView>,
    pub total: usize,
}

/// Owner details embedded in leaderboard entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardOwner {
    pub id: UserId,
    pub name: String,
}

/// Reduced projection used by the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub id: GrillId,
    pub title: String,
    pub image_ref: Option<String>,
    pub likes_count: usize,
    pub owner: LeaderboardOwner,
}

impl LeaderboardEntry {
    /// Project a grill into its leaderboard row.
    pub fn project(grill: &Grill, owner: Option<&User>) -> Self {
        let owner = owner.map_or_else(
            || LeaderboardOwner {
                id: *grill.owner_id(),
                name: DELETED_OWNER_NAME.to_owned(),
            },
            |user| LeaderboardOwner {
                id: *user.id(),
                name: user.name().to_owned(),
            },
        );
        Self {
            id: *grill.id(),
            title: grill.title().to_owned(),
            image_ref: grill.image_ref().map(str::to_owned),
            likes_count: grill.likes_count(),
            owner,
        }
    }
}

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    pub id: GrillId,
    pub likes_count: usize,
    pub liked_by_current_user: bool,
}
