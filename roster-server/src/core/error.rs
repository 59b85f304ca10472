use shared::error::ErrorCode;
use thiserror::Error;

use crate::db::repository::RepoError;

/// 启动阶段错误
///
/// 请求阶段的错误统一使用 [`shared::error::AppError`]；
/// 这里只覆盖进程启动/运行时的致命错误。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("存储不可用: {0}")]
    StoreUnavailable(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// 对应的统一错误码 (用于启动失败日志)
    pub fn code(&self) -> ErrorCode {
        match self {
            ServerError::Config(_) => ErrorCode::ConfigError,
            ServerError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            ServerError::Io(_) => ErrorCode::InternalError,
        }
    }
}

impl From<RepoError> for ServerError {
    fn from(err: RepoError) -> Self {
        ServerError::StoreUnavailable(err.to_string())
    }
}

/// 启动流程的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
