//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`employees`] - 员工管理接口

pub mod employees;
pub mod health;

// Re-export common types for handlers
pub use shared::error::{AppError, AppResult};
