//! In-memory persistence adapters.
//!
//! Both stores implement their domain ports over `RwLock`-guarded maps.
//! They are thin translators: uniqueness and existence checks live here,
//! while validation, ranking and vote arithmetic stay in the domain.
//!
//! Process-local storage means a restart loses all state; the ports keep
//! that swappable for a database-backed implementation without touching
//! the domain.

mod memory_grill_store;
mod memory_user_store;

pub use memory_grill_store::InMemoryGrillStore;
pub use memory_user_store::InMemoryUserStore;
