//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! HTTP handlers live under [`http`]; the REST surface is the only inbound
//! transport.

pub mod http;
