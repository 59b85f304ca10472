//! Data models
//!
//! Shared between roster-server and roster-client (via API).

pub mod employee;

// Re-exports
pub use employee::*;
