//! Roster Server - 员工名册 HTTP 服务
//!
//! # 架构概述
//!
//! - **存储** (`db`): SurrealDB 连接池 (惰性连接、进程内只连接一次) 与员工仓储
//! - **HTTP API** (`api`): `/api/employees` 增删改查, `/health` 健康检查
//! - **路由** (`routes`): 组装路由与 tower-http 中间件
//!
//! # 模块结构
//!
//! ```text
//! roster-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── db/            # 连接池、仓储
//! ├── api/           # HTTP 处理器
//! ├── routes/        # 路由组装
//! ├── middleware/    # 请求日志
//! └── utils/         # 日志初始化
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState};
pub use db::DbPool;
pub use db::repository::{EmployeeRepository, RepoError};
pub use routes::{build_app, build_router};

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
