//! Rulebook - 服务器规则与游戏模式管理 API
//!
//! 用法:
//! - `rulebook`         启动 HTTP 服务
//! - `rulebook invoke`  从 stdin 读取一个网关事件，处理后把响应写到 stdout

use std::sync::Arc;

use tokio::io::AsyncReadExt;

use rulebook::config::{load_config, print_config, LogConfig};
use rulebook::infrastructure::gateway;
use rulebook::infrastructure::http::{build_router, AppState, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：DATABASE_URL > 环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    let invoke_mode = std::env::args().nth(1).as_deref() == Some("invoke");

    tracing::info!("Rulebook - 服务器规则与游戏模式管理 API");
    print_config(&config);

    let state = AppState::connect(&config.database).await?;

    if invoke_mode {
        let mut event = String::new();
        tokio::io::stdin().read_to_string(&mut event).await?;

        let response = gateway::invoke_json(build_router(Arc::new(state)), &event).await?;
        println!("{}", response);
        return Ok(());
    }

    let server = HttpServer::new(config.server.clone(), state);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，输出到 stderr，`invoke` 模式下 stdout 只留给响应
fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},rulebook={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
