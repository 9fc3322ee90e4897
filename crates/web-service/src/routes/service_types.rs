//! 服务类型接口

use crate::models::common::JsonBody;
use crate::models::err::AppError;
use crate::models::service_type::{ServiceTypeCreate, ServiceTypeInfo, ServiceTypeUpdate};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use validator::Validate;

/// 查询全部服务类型
#[utoipa::path(get,
    path = "/service-types",
    tag = "service-types",
    responses(
        (status = 200, description = "All service types ordered by name", body = Vec<ServiceTypeInfo>)
    ),
)]
pub async fn find_service_types(State(state): State<AppState>) -> Result<Json<Vec<ServiceTypeInfo>>, AppError> {
    let service_types = state.service_types.find_service_types().await?;
    Ok(Json(service_types.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/service-types/{id}", tag = "service-types",
    responses(
        (status = 200, body = ServiceTypeInfo),
        (status = 404, description = "Service type not found")
    )
)]
pub async fn get_service_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ServiceTypeInfo>, AppError> {
    let service_type = state.service_types.get_service_type(id).await?;
    Ok(Json(service_type.into()))
}

/// 创建服务类型
///
/// 名称全局唯一，重复时返回 409
#[utoipa::path(post,
    path = "/service-types",
    tag = "service-types",
    request_body = ServiceTypeCreate,
    responses(
        (status = 201, description = "Created service type", body = ServiceTypeInfo),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn create_service_type(
    State(state): State<AppState>,
    JsonBody(service_type): JsonBody<ServiceTypeCreate>,
) -> Result<(StatusCode, Json<ServiceTypeInfo>), AppError> {
    debug!("📝 创建服务类型 {:#?}", service_type);
    service_type.validate()?;

    let service_type = state.service_types.create_service_type(service_type.into()).await?;
    Ok((StatusCode::CREATED, Json(service_type.into())))
}

#[utoipa::path(patch, path = "/service-types/{id}", tag = "service-types", request_body = ServiceTypeUpdate,
    responses((status = 200, body = ServiceTypeInfo))
)]
pub async fn update_service_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(info): JsonBody<ServiceTypeUpdate>,
) -> Result<Json<ServiceTypeInfo>, AppError> {
    debug!("🔄 更新服务类型 {} {:#?}", id, info);
    info.validate()?;

    let service_type = state.service_types.update_service_type(id, info.into()).await?;
    Ok(Json(service_type.into()))
}

/// 删除服务类型
///
/// 所属工种一并删除，员工和机车上的引用被置空
#[utoipa::path(delete, path = "/service-types/{id}", tag = "service-types",
    responses((status = 200, body = ServiceTypeInfo))
)]
pub async fn delete_service_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ServiceTypeInfo>, AppError> {
    let service_type = state.service_types.delete_service_type(id).await?;
    Ok(Json(service_type.into()))
}
