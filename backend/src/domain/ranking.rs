//! Listing order and search for grills.
//!
//! Pure helpers over in-memory slices. Sorting is total: every comparator
//! falls back to the grill id so equal keys still order deterministically
//! across runs.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::Grill;

/// Default number of entries on the leaderboard.
pub const LEADERBOARD_DEFAULT_LIMIT: usize = 3;
/// Smallest accepted leaderboard size.
pub const LEADERBOARD_MIN_LIMIT: i64 = 1;
/// Largest accepted leaderboard size.
pub const LEADERBOARD_MAX_LIMIT: i64 = 50;

/// Requested listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Newest first by creation time.
    #[default]
    New,
    /// Most liked first; ties go to the newer grill.
    Top,
}

/// Error returned when a sort mode string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSortMode {
    value: String,
}

impl fmt::Display for InvalidSortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort mode: {}", self.value)
    }
}

impl std::error::Error for InvalidSortMode {}

impl FromStr for SortMode {
    type Err = InvalidSortMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Self::New),
            "top" => Ok(Self::Top),
            other => Err(InvalidSortMode {
                value: other.to_owned(),
            }),
        }
    }
}

/// Case-insensitive substring match over title or description.
///
/// A blank query matches everything, mirroring an absent search box.
pub fn matches_query(grill: &Grill, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    grill.title().to_lowercase().contains(&needle)
        || grill.description().to_lowercase().contains(&needle)
}

/// Newest first: `created_at` descending, id descending on ties.
pub fn compare_newest(a: &Grill, b: &Grill) -> Ordering {
    b.created_at()
        .cmp(&a.created_at())
        .then_with(|| b.id().as_uuid().cmp(a.id().as_uuid()))
}

/// Most liked first: like count descending, then newest, then id.
///
/// The recency tiebreak keeps `sort=top` and the leaderboard in the same
/// order and makes a zero-like listing identical to `sort=new`.
pub fn compare_top(a: &Grill, b: &Grill) -> Ordering {
    b.likes_count()
        .cmp(&a.likes_count())
        .then_with(|| compare_newest(a, b))
}

/// Sort grills in place according to the requested mode.
pub fn sort_grills(grills: &mut [Grill], mode: SortMode) {
    match mode {
        SortMode::New => grills.sort_by(compare_newest),
        SortMode::Top => grills.sort_by(compare_top),
    }
}

/// Resolve the effective leaderboard size.
///
/// Absent means the default; out-of-range values clamp into
/// `[LEADERBOARD_MIN_LIMIT, LEADERBOARD_MAX_LIMIT]` rather than erroring.
pub fn clamp_leaderboard_limit(requested: Option<i64>) -> usize {
    let Some(limit) = requested else {
        return LEADERBOARD_DEFAULT_LIMIT;
    };
    let clamped = limit.clamp(LEADERBOARD_MIN_LIMIT, LEADERBOARD_MAX_LIMIT);
    usize::try_from(clamped).unwrap_or(LEADERBOARD_DEFAULT_LIMIT)
}

/// Take the `limit` most liked grills, ordered like [`SortMode::Top`].
pub fn top_n(mut grills: Vec<Grill>, limit: usize) -> Vec<Grill> {
    grills.sort_by(compare_top);
    grills.truncate(limit);
    grills
}
