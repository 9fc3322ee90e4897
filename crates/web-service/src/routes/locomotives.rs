//! 机车接口

use crate::models::common::JsonBody;
use crate::models::err::AppError;
use crate::models::locomotive::{LocomotiveCreate, LocomotiveInfo, LocomotiveUpdate};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use validator::Validate;

/// 查询全部机车，按机车号排序
#[utoipa::path(get, path = "/locomotives", tag = "locomotives", responses((status = 200, body = Vec<LocomotiveInfo>)))]
pub async fn find_locomotives(State(state): State<AppState>) -> Result<Json<Vec<LocomotiveInfo>>, AppError> {
    let locomotives = state.locomotives.find_locomotives().await?;
    Ok(Json(locomotives.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/locomotives/{id}", tag = "locomotives", responses((status = 200, body = LocomotiveInfo)))]
pub async fn get_locomotive(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LocomotiveInfo>, AppError> {
    Ok(Json(state.locomotives.get_locomotive(id).await?.into()))
}

/// 创建机车
///
/// - 机车号重复返回 409
/// - 引用的作业地点、服务类型、工种不存在返回 404
/// - 工种不属于给定的服务类型返回 400
#[utoipa::path(post,
    path = "/locomotives",
    tag = "locomotives",
    request_body = LocomotiveCreate,
    responses(
        (status = 201, description = "Created locomotive", body = LocomotiveInfo),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced record not found"),
        (status = 409, description = "Number already exists")
    )
)]
pub async fn create_locomotive(
    State(state): State<AppState>,
    JsonBody(locomotive): JsonBody<LocomotiveCreate>,
) -> Result<(StatusCode, Json<LocomotiveInfo>), AppError> {
    debug!("📝 创建机车 {:#?}", locomotive);
    locomotive.validate()?;

    let locomotive = state.locomotives.create_locomotive(locomotive.into()).await?;
    Ok((StatusCode::CREATED, Json(locomotive.into())))
}

#[utoipa::path(patch, path = "/locomotives/{id}", tag = "locomotives", request_body = LocomotiveUpdate,
    responses((status = 200, body = LocomotiveInfo))
)]
pub async fn update_locomotive(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(info): JsonBody<LocomotiveUpdate>,
) -> Result<Json<LocomotiveInfo>, AppError> {
    debug!("🔄 更新机车 {} {:#?}", id, info);
    info.validate()?;

    let locomotive = state.locomotives.update_locomotive(id, info.into()).await?;
    Ok(Json(locomotive.into()))
}

#[utoipa::path(delete,
    path = "/locomotives/{id}",
    tag = "locomotives",
    responses(
        (status = 200, body = LocomotiveInfo),
        (status = 409, description = "Employees are still assigned to the locomotive")
    )
)]
pub async fn delete_locomotive(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LocomotiveInfo>, AppError> {
    Ok(Json(state.locomotives.delete_locomotive(id).await?.into()))
}
