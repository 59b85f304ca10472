use super::ServerError;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | (必填) | 存储连接串, 如 `rocksdb://data/roster.db`, `mem://` |
/// | DB_NAMESPACE | roster | SurrealDB namespace |
/// | DB_NAME | roster | SurrealDB database |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | LOG_LEVEL | info | 默认日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志目录 (存在时按天滚动写文件) |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=rocksdb://data/roster.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 存储连接串
    pub database_url: String,
    /// SurrealDB namespace
    pub db_namespace: String,
    /// SurrealDB database
    pub db_name: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 默认日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 使用给定连接串和默认值创建配置 (不读取环境变量)
    ///
    /// 常用于测试场景
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            db_namespace: "roster".into(),
            db_name: "roster".into(),
            http_port: 3000,
            log_level: "info".into(),
            log_dir: None,
            environment: "development".into(),
        }
    }

    /// 从环境变量加载配置
    ///
    /// `DATABASE_URL` 未设置或为空时返回 [`ServerError::Config`]
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ServerError::Config("DATABASE_URL must be set".into()))?;

        let mut config = Self::new(database_url);
        if let Some(ns) = lookup("DB_NAMESPACE").filter(|v| !v.is_empty()) {
            config.db_namespace = ns;
        }
        if let Some(db) = lookup("DB_NAME").filter(|v| !v.is_empty()) {
            config.db_name = db;
        }
        config.http_port = lookup("HTTP_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(config.http_port);
        if let Some(level) = lookup("LOG_LEVEL").filter(|v| !v.is_empty()) {
            config.log_level = level;
        }
        config.log_dir = lookup("LOG_DIR").filter(|v| !v.is_empty());
        if let Some(env) = lookup("ENVIRONMENT").filter(|v| !v.is_empty()) {
            config.environment = env;
        }
        Ok(config)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_database_url_is_required() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));

        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "mem://")])).unwrap();
        assert_eq!(config.database_url, "mem://");
        assert_eq!(config.db_namespace, "roster");
        assert_eq!(config.db_name, "roster");
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.is_none());
        assert!(config.is_development());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "rocksdb://data/roster.db"),
            ("DB_NAMESPACE", "acme"),
            ("DB_NAME", "hr"),
            ("HTTP_PORT", "8080"),
            ("LOG_DIR", "/var/log/roster"),
            ("ENVIRONMENT", "production"),
        ]))
        .unwrap();
        assert_eq!(config.db_namespace, "acme");
        assert_eq!(config.db_name, "hr");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/roster"));
        assert!(config.is_production());
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "mem://"),
            ("HTTP_PORT", "not-a-port"),
        ]))
        .unwrap();
        assert_eq!(config.http_port, 3000);
    }
}
