use crate::core::{Config, Result};
use crate::db::DbPool;
use crate::db::repository::{EmployeeRepository, RepoResult};

/// 服务器状态 - 持有配置与存储连接池
///
/// 使用 Arc 实现浅拷贝 (连接池内部共享)，由进程入口创建后注入到每个处理器。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | DbPool | 存储连接池 (惰性连接、只连接一次) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 存储连接池
    pub pool: DbPool,
}

impl ServerState {
    /// 创建服务器状态 (不建立连接)
    pub fn new(config: Config, pool: DbPool) -> Self {
        Self { config, pool }
    }

    /// 初始化服务器状态
    ///
    /// 启动时即建立存储连接：连接失败是致命错误，返回
    /// [`ServerError::StoreUnavailable`](crate::core::ServerError::StoreUnavailable)。
    pub async fn initialize(config: &Config) -> Result<Self> {
        let pool = DbPool::from_config(config);
        pool.connection().await?;
        Ok(Self::new(config.clone(), pool))
    }

    /// 员工仓储 (复用已建立的连接)
    pub async fn employees(&self) -> RepoResult<EmployeeRepository> {
        Ok(EmployeeRepository::new(self.pool.connection().await?))
    }
}
