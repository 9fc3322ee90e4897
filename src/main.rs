//! 机务段后台服务入口
//!
//! 负责初始化日志、加载配置、连接数据库并执行迁移，然后启动 Web 服务。
//! 收到 Ctrl+C 后通过 watch 通道通知 Web 服务优雅退出。

use color_eyre::Result;
use database::initialize_database;
use shared_lib::AppConfig;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 未设置 `RUST_LOG` 时使用的日志级别
const DEFAULT_LOG_FILTER: &str = "info,depot_backend=debug,web_service=debug,database=debug";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    info!("🚀 启动机务段后台服务...");

    let config = AppConfig::load()?;
    let pool = initialize_database(config.clone()).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("📴 收到退出信号"),
            Err(e) => error!("❌ 监听退出信号失败: {}", e),
        }
        let _ = shutdown_tx.send(true);
    });

    web_service::start_web_service(config, pool.clone(), shutdown_rx).await?;

    pool.close().await;
    info!("👋 服务已停止");
    Ok(())
}
