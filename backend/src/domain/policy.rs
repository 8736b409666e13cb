//! Mutation policy for grills.
//!
//! Pure decision logic: admins may mutate anything, everyone else only
//! their own grills. No I/O, no clock, so callers can check the policy
//! after loading and before validating.

use crate::domain::{Grill, Principal};

/// Whether the principal may update or delete the given grill.
pub fn can_mutate(principal: &Principal, grill: &Grill) -> bool {
    principal.role.is_admin() || principal.user_id == *grill.owner_id()
}
