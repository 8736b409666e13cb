//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account;
mod grill_command;
mod grill_query;
mod grill_store;
mod grill_view;
mod password_hasher;
mod token_service;
mod user_store;

#[cfg(test)]
pub use account::MockAccountService;
pub use account::{
    AccountService, AuthenticatedAccount, FixtureAccountService, LoginRequest, RegisterRequest,
};
#[cfg(test)]
pub use grill_command::MockGrillCommand;
pub use grill_command::{
    CreateGrillRequest, FixtureGrillCommand, GrillCommand, UpdateGrillRequest,
};
#[cfg(test)]
pub use grill_query::MockGrillQuery;
pub use grill_query::{FixtureGrillQuery, GrillQuery, ListGrillsRequest};
#[cfg(test)]
pub use grill_store::MockGrillStore;
pub use grill_store::{FixtureGrillStore, GrillStore, GrillStoreError};
pub use grill_view::{
    DELETED_OWNER_NAME, GrillListing, GrillView, LeaderboardEntry, LeaderboardOwner, LikeOutcome,
    OwnerSummary,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{FixtureTokenService, TokenService, TokenServiceError};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{FixtureUserStore, UserStore, UserStoreError};

#[cfg(test)]
mod tests;
