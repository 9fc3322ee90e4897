//! Web服务模块
//!
//! 提供 HTTP API 接口和文档服务

use color_eyre::Result;
use database::{DatabasePool, Repositories};
use shared_lib::AppConfig;
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::{info, warn};

pub mod models;
pub mod routes;
pub mod services;

pub use routes::create_app_router;

use services::{
    BrigadaService, Clock, EmployeeService, LeaveService, LeaveTypeService, LocationService, LocomotiveService,
    PhotoStorage, ServiceTypeService, WorkTypeService,
};

/// 应用共享状态
///
/// 每个请求都会 clone 一份，内部全部是 `Arc`
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service_types: ServiceTypeService,
    pub work_types: WorkTypeService,
    pub brigades: BrigadaService,
    pub locations: LocationService,
    pub locomotives: LocomotiveService,
    pub employees: EmployeeService,
    pub leave_types: LeaveTypeService,
    pub leaves: LeaveService,
}

impl AppState {
    /// 使用服务器本地日期作为"今天"
    pub fn new(repositories: Repositories, config: Arc<AppConfig>) -> Self {
        Self::with_clock(repositories, config, services::system_clock())
    }

    pub fn with_clock(repositories: Repositories, config: Arc<AppConfig>, clock: Clock) -> Self {
        let photos = PhotoStorage::new(&config.upload_dir, config.max_photo_bytes);
        Self {
            service_types: ServiceTypeService::new(&repositories),
            work_types: WorkTypeService::new(&repositories),
            brigades: BrigadaService::new(&repositories),
            locations: LocationService::new(&repositories),
            locomotives: LocomotiveService::new(&repositories),
            employees: EmployeeService::new(&repositories, photos),
            leave_types: LeaveTypeService::new(&repositories),
            leaves: LeaveService::new(&repositories, clock),
            config,
        }
    }
}

/// 启动 Web 服务
pub async fn start_web_service(
    config: Arc<AppConfig>,
    pool: DatabasePool,
    mut shutdown_rx: Receiver<bool>,
) -> Result<()> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let shared_state = AppState::new(Repositories::postgres(pool), config.clone());
    let router = create_app_router(shared_state);

    info!("🚀 启动 Web Service 在 {}", config.bind_addr);
    info!("📖 API 文档: http://{}/docs", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            if shutdown_rx.changed().await.is_err() {
                warn!("⚠️ 关闭信号通道已断开");
            }
            info!("🛑 Web Service 正在关闭...");
        })
        .await?;

    Ok(())
}
