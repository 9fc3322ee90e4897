//! 路由入口
//!
//! 提供 [`create_app_router`] 函数，导出当前App的所有路由。
//!
//! 用户可以在导出路由时传入共享数据 shared_state，这样所有路由函数都可以访问。

use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_scalar::{Scalar, Servable};

pub mod brigades;
pub mod employees;
pub mod leave_types;
pub mod leaves;
pub mod locations;
pub mod locomotives;
pub mod service_types;
pub mod work_types;

use brigades::*;
use employees::*;
use leave_types::*;
use leaves::*;
use locations::*;
use locomotives::*;
use service_types::*;
use work_types::*;

/// multipart 表单除文件外的额外开销
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// 导出当前App的所有业务路由
///
/// ## **❗️注意事项：**
///
/// 由于 [`routes!`] 宏限制，同一个宏里面只能放同一路径下不同 http 方法的接口，
/// 相同方法需要拆开定义：
///
/// ```rust,ignore
/// routes!(get, post)
/// .routes!(get)
/// ```
fn routers(state: AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(find_service_types, create_service_type))
        .routes(routes!(get_service_type, update_service_type, delete_service_type))
        .routes(routes!(find_work_types, create_work_type))
        .routes(routes!(get_work_type, update_work_type, delete_work_type))
        .routes(routes!(find_brigades, create_brigada))
        .routes(routes!(get_brigada, update_brigada, delete_brigada))
        .routes(routes!(find_brigada_employees))
        .routes(routes!(find_locations, create_location))
        .routes(routes!(get_location, update_location, delete_location))
        .routes(routes!(find_locomotives, create_locomotive))
        .routes(routes!(get_locomotive, update_locomotive, delete_locomotive))
        .routes(routes!(find_employees, create_employee))
        .routes(routes!(search_employees))
        .routes(routes!(get_employee, update_employee, delete_employee))
        .routes(routes!(upload_employee_photo))
        .routes(routes!(find_employee_leaves))
        .routes(routes!(find_leave_types, create_leave_type))
        .routes(routes!(get_leave_type, update_leave_type, delete_leave_type))
        .routes(routes!(find_leaves, create_leave))
        .routes(routes!(get_leave, update_leave, delete_leave))
        .routes(routes!(find_active_leaves))
        .routes(routes!(find_upcoming_leaves))
        .routes(routes!(find_today_leaves))
        .routes(routes!(leave_statistics))
        .routes(routes!(check_leave_conflicts))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// 创建当前App的路由
///
/// 完成以下功能：
/// - 生成OpenAPI文档，用户可通过 /docs 访问
/// - 业务接口统一挂在 `/api/v1` 下
/// - `/uploads` 提供员工照片的静态访问
/// - `/health` 健康检查
///
/// 由于使用了 `utoipa` 库来自动化生成`openapi`文档，因此我们没有使用原生的 [`Router`]，而是使用了
/// [`OpenApiRouter`] 。
pub fn create_app_router(shared_state: AppState) -> Router {
    // 当前项目的OpenAPI声明
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Depot back office API"),
        tags(
            (name = "employees", description = "Depot staff, search and photos"),
            (name = "leaves", description = r#"
Employee leaves. Intervals are closed on both ends; two leaves of the same employee
may not share a single day. Status is computed against the server's local date.
            "#),
            (name = "brigades", description = "Crews"),
            (name = "locomotives", description = "Locomotive fleet"),
            (name = "locations", description = "Work locations"),
            (name = "service-types", description = "Service types"),
            (name = "work-types", description = "Work types inside a service type"),
            (name = "leave-types", description = "Leave categories")
        ),
    )]
    struct ApiDoc;

    let upload_dir = shared_state.config.upload_dir.clone();
    let body_limit = shared_state.config.max_photo_bytes + MULTIPART_OVERHEAD;

    // - router: Axum的Router，实际的路由对象
    // - api: utoipa的OpenApi，生成的OpenAPI对象
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/v1", routers(shared_state))
        .split_for_parts();

    router
        .merge(Scalar::with_url("/docs", api))
        .route("/health", get(health))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
