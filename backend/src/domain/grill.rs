//! Grill aggregate: a showcased barbecue build and its like votes.
//!
//! The voter set is the single source of truth for the like count; the
//! count is derived on read and never stored, so it cannot drift.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Validation errors returned by the grill constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrillValidationError {
    EmptyTitle,
    EmptyDescription,
}

impl fmt::Display for GrillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
        }
    }
}

impl std::error::Error for GrillValidationError {}

/// Stable grill identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrillId(Uuid);

impl GrillId {
    /// Generate a new random [`GrillId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for GrillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for GrillId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Unvalidated field bundle for building a [`Grill`].
///
/// New grills start with an empty voter set; `updated_at` starts equal to
/// `created_at`.
#[derive(Debug, Clone)]
pub struct GrillDraft {
    pub id: GrillId,
    pub title: String,
    pub description: String,
    pub image_ref: Option<String>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Partial edit applied to an existing grill.
///
/// Absent fields are left untouched. A present but blank `image_ref`
/// clears the image. Ownership and votes are not editable.
#[derive(Debug, Clone, Default)]
pub struct GrillEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_ref: Option<String>,
}

/// A showcased grill build.
///
/// ## Invariants
/// - `title` and `description` are non-empty once trimmed.
/// - `owner_id` never changes after construction.
/// - `voters` holds each user at most once; the like count is always
///   `voters.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grill {
    id: GrillId,
    title: String,
    description: String,
    image_ref: Option<String>,
    owner_id: UserId,
    voters: HashSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Grill {
    /// Build a new [`Grill`], enforcing the content invariants.
    pub fn new(draft: GrillDraft) -> Result<Self, GrillValidationError> {
        let GrillDraft {
            id,
            title,
            description,
            image_ref,
            owner_id,
            created_at,
        } = draft;

        validate_title(&title)?;
        validate_description(&description)?;

        Ok(Self {
            id,
            title,
            description,
            image_ref: normalise_image_ref(image_ref),
            owner_id,
            voters: HashSet::new(),
            created_at,
            updated_at: created_at,
        })
    }

    /// Stable grill identifier.
    pub const fn id(&self) -> &GrillId {
        &self.id
    }

    /// Title shown in listings.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Longer build description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Opaque image reference, if any.
    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    /// Identifier of the owning user. Immutable for the grill's lifetime.
    pub const fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Users currently liking this grill.
    pub const fn voters(&self) -> &HashSet<UserId> {
        &self.voters
    }

    /// Derived like count; always the voter set cardinality.
    pub fn likes_count(&self) -> usize {
        self.voters.len()
    }

    /// Whether the given user currently likes this grill.
    pub fn is_liked_by(&self, user_id: &UserId) -> bool {
        self.voters.contains(user_id)
    }

    /// Creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the latest successful mutation.
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Flip the user's vote and report whether they like the grill now.
    ///
    /// Inserting an existing voter or removing an absent one is impossible
    /// by construction, so toggling twice always restores the prior state.
    pub fn toggle_vote(&mut self, user_id: UserId, now: DateTime<Utc>) -> bool {
        let liked = if self.voters.remove(&user_id) {
            false
        } else {
            self.voters.insert(user_id);
            true
        };
        self.updated_at = now;
        liked
    }

    /// Apply a partial edit, refreshing `updated_at` on success.
    ///
    /// Fails without mutating if a supplied field would break an
    /// invariant.
    pub fn apply_edit(
        &mut self,
        edit: GrillEdit,
        now: DateTime<Utc>,
    ) -> Result<(), GrillValidationError> {
        if let Some(title) = edit.title.as_deref() {
            validate_title(title)?;
        }
        if let Some(description) = edit.description.as_deref() {
            validate_description(description)?;
        }

        if let Some(title) = edit.title {
            self.title = title;
        }
        if let Some(description) = edit.description {
            self.description = description;
        }
        if let Some(image_ref) = edit.image_ref {
            self.image_ref = normalise_image_ref(Some(image_ref));
        }
        self.updated_at = now;
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), GrillValidationError> {
    if title.trim().is_empty() {
        return Err(GrillValidationError::EmptyTitle);
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), GrillValidationError> {
    if description.trim().is_empty() {
        return Err(GrillValidationError::EmptyDescription);
    }
    Ok(())
}

/// Collapse blank references to `None` so "no image" has one spelling.
fn normalise_image_ref(image_ref: Option<String>) -> Option<String> {
    image_ref.filter(|r| !r.trim().is_empty())
}
