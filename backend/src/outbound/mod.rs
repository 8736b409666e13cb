//! Outbound adapters implementing domain ports for infrastructure concerns.
//!
//! This module follows the hexagonal architecture pattern:
//!
//! - **persistence**: in-memory stores for users and grills
//! - **security**: Argon2id password hashing and HS256 token signing
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
pub mod security;
