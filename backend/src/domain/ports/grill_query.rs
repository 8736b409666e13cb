//! Driving port for grill reads.

use async_trait::async_trait;

use crate::domain::{DomainError, GrillId, SortMode, UserId};

use super::grill_view::{GrillListing, GrillView, LeaderboardEntry};

/// Listing parameters after wire-level parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListGrillsRequest {
    /// Case-insensitive substring filter over title and description.
    pub query: Option<String>,
    /// Requested ordering; defaults to newest first.
    pub sort: SortMode,
}

/// Domain use-case port for grill reads.
///
/// The viewer is optional everywhere except `mine`: anonymous callers get
/// the same data with `likedByCurrentUser` pinned to false.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GrillQuery: Send + Sync {
    /// List grills with optional search and ordering.
    async fn list(
        &self,
        viewer: Option<UserId>,
        request: ListGrillsRequest,
    ) -> Result<GrillListing, DomainError>;

    /// The most liked grills in reduced projection.
    ///
    /// `limit` is clamped into the supported range; `None` means the
    /// default board size.
    async fn leaderboard(&self, limit: Option<i64>)
    -> Result<Vec<LeaderboardEntry>, DomainError>;

    /// The viewer's own grills, newest first.
    async fn mine(&self, viewer: &UserId) -> Result<GrillListing, DomainError>;

    /// A single grill by id.
    async fn get(&self, viewer: Option<UserId>, id: &GrillId)
    -> Result<GrillView, DomainError>;
}

/// Fixture implementation serving an empty showcase.
pub struct FixtureGrillQuery;

#[async_trait]
impl GrillQuery for FixtureGrillQuery {
    async fn list(
        &self,
        _viewer: Option<UserId>,
        _request: ListGrillsRequest,
    ) -> Result<GrillListing, DomainError> {
        Ok(GrillListing {
            items: Vec::new(),
            total: 0,
        })
    }

    async fn leaderboard(
        &self,
        _limit: Option<i64>,
    ) -> Result<Vec<LeaderboardEntry>, DomainError> {
        Ok(Vec::new())
    }

    async fn mine(&self, _viewer: &UserId) -> Result<GrillListing, DomainError> {
        Ok(GrillListing {
            items: Vec::new(),
            total: 0,
        })
    }

    async fn get(
        &self,
        _viewer: Option<UserId>,
        _id: &GrillId,
    ) -> Result<GrillView, DomainError> {
        Err(DomainError::not_found("Grill not found"))
    }
}
