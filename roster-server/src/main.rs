use roster_server::{Config, Server, ServerState, init_logger, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载 .env
    dotenv::dotenv().ok();

    // 2. 加载配置 (DATABASE_URL 缺失时立即失败)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_logger();
            tracing::error!(code = %e.code(), "Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // 3. 日志
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    tracing::info!(
        "Roster server starting (env: {}, version: {})",
        config.environment,
        env!("CARGO_PKG_VERSION")
    );

    // 4. 连接存储 (失败即退出，不在请求中重试)
    let state = match ServerState::initialize(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(code = %e.code(), "Startup aborted: {}", e);
            return Err(e.into());
        }
    };

    // 5. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!(code = %e.code(), "Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
