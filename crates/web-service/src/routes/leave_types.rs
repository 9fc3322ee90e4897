//! 假期类型接口

use crate::models::common::JsonBody;
use crate::models::err::AppError;
use crate::models::leave_type::{LeaveTypeCreate, LeaveTypeInfo, LeaveTypeUpdate};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use validator::Validate;

#[utoipa::path(get, path = "/leave-types", tag = "leave-types", responses((status = 200, body = Vec<LeaveTypeInfo>)))]
pub async fn find_leave_types(State(state): State<AppState>) -> Result<Json<Vec<LeaveTypeInfo>>, AppError> {
    let leave_types = state.leave_types.find_leave_types().await?;
    Ok(Json(leave_types.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/leave-types/{id}", tag = "leave-types", responses((status = 200, body = LeaveTypeInfo)))]
pub async fn get_leave_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LeaveTypeInfo>, AppError> {
    Ok(Json(state.leave_types.get_leave_type(id).await?.into()))
}

#[utoipa::path(post,
    path = "/leave-types",
    tag = "leave-types",
    request_body = LeaveTypeCreate,
    responses(
        (status = 201, description = "Created leave type", body = LeaveTypeInfo),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn create_leave_type(
    State(state): State<AppState>,
    JsonBody(leave_type): JsonBody<LeaveTypeCreate>,
) -> Result<(StatusCode, Json<LeaveTypeInfo>), AppError> {
    debug!("📝 创建假期类型 {:#?}", leave_type);
    leave_type.validate()?;

    let leave_type = state.leave_types.create_leave_type(leave_type.into()).await?;
    Ok((StatusCode::CREATED, Json(leave_type.into())))
}

#[utoipa::path(patch, path = "/leave-types/{id}", tag = "leave-types", request_body = LeaveTypeUpdate,
    responses((status = 200, body = LeaveTypeInfo))
)]
pub async fn update_leave_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(info): JsonBody<LeaveTypeUpdate>,
) -> Result<Json<LeaveTypeInfo>, AppError> {
    debug!("🔄 更新假期类型 {} {:#?}", id, info);
    info.validate()?;

    let leave_type = state.leave_types.update_leave_type(id, info.into()).await?;
    Ok(Json(leave_type.into()))
}

/// 删除假期类型，仍被假期引用时返回 409
#[utoipa::path(delete,
    path = "/leave-types/{id}",
    tag = "leave-types",
    responses(
        (status = 200, body = LeaveTypeInfo),
        (status = 409, description = "Leave type is still in use")
    )
)]
pub async fn delete_leave_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LeaveTypeInfo>, AppError> {
    Ok(Json(state.leave_types.delete_leave_type(id).await?.into()))
}
