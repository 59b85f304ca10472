//! Shared types for the roster services
//!
//! Types used by both roster-server and roster-client: the employee
//! model and its form schema, unified error codes and the API error body.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{Employee, EmployeeInput, EmployeeUpdate};
