//! 工种接口

use crate::models::common::{JsonBody, QueryParams};
use crate::models::err::AppError;
use crate::models::work_type::{WorkTypeCreate, WorkTypeInfo, WorkTypeQuery, WorkTypeUpdate};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use validator::Validate;

/// 查询工种
///
/// 可以通过 `service_type_id` 只查询某个服务类型下的工种
#[utoipa::path(get,
    path = "/work-types",
    tag = "work-types",
    params(WorkTypeQuery),
    responses(
        (status = 200, description = "Work types", body = Vec<WorkTypeInfo>)
    ),
)]
pub async fn find_work_types(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<WorkTypeQuery>,
) -> Result<Json<Vec<WorkTypeInfo>>, AppError> {
    let work_types = state.work_types.find_work_types(query.service_type_id).await?;
    Ok(Json(work_types.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/work-types/{id}", tag = "work-types", responses((status = 200, body = WorkTypeInfo)))]
pub async fn get_work_type(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<WorkTypeInfo>, AppError> {
    Ok(Json(state.work_types.get_work_type(id).await?.into()))
}

/// 创建工种
///
/// 服务类型必须存在（否则 404），名称在同一服务类型下唯一（否则 409）
#[utoipa::path(post,
    path = "/work-types",
    tag = "work-types",
    request_body = WorkTypeCreate,
    responses(
        (status = 201, description = "Created work type", body = WorkTypeInfo),
        (status = 404, description = "Service type not found"),
        (status = 409, description = "Name already used in this service type")
    )
)]
pub async fn create_work_type(
    State(state): State<AppState>,
    JsonBody(work_type): JsonBody<WorkTypeCreate>,
) -> Result<(StatusCode, Json<WorkTypeInfo>), AppError> {
    debug!("📝 创建工种 {:#?}", work_type);
    work_type.validate()?;

    let work_type = state.work_types.create_work_type(work_type.into()).await?;
    Ok((StatusCode::CREATED, Json(work_type.into())))
}

#[utoipa::path(patch, path = "/work-types/{id}", tag = "work-types", request_body = WorkTypeUpdate,
    responses((status = 200, body = WorkTypeInfo))
)]
pub async fn update_work_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(info): JsonBody<WorkTypeUpdate>,
) -> Result<Json<WorkTypeInfo>, AppError> {
    debug!("🔄 更新工种 {} {:#?}", id, info);
    info.validate()?;

    let work_type = state.work_types.update_work_type(id, info.into()).await?;
    Ok(Json(work_type.into()))
}

#[utoipa::path(delete, path = "/work-types/{id}", tag = "work-types", responses((status = 200, body = WorkTypeInfo)))]
pub async fn delete_work_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<WorkTypeInfo>, AppError> {
    Ok(Json(state.work_types.delete_work_type(id).await?.into()))
}
