//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod grills;
pub mod health;
pub mod identity;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
