//! 班组接口

use crate::models::brigada::{BrigadaCreate, BrigadaInfo, BrigadaUpdate};
use crate::models::common::JsonBody;
use crate::models::employee::EmployeeInfo;
use crate::models::err::AppError;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use validator::Validate;

#[utoipa::path(get,
    path = "/brigades",
    tag = "brigades",
    responses(
        (status = 200, description = "All brigades ordered by name", body = Vec<BrigadaInfo>)
    ),
)]
pub async fn find_brigades(State(state): State<AppState>) -> Result<Json<Vec<BrigadaInfo>>, AppError> {
    let brigades = state.brigades.find_brigades().await?;
    Ok(Json(brigades.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/brigades/{id}", tag = "brigades", responses((status = 200, body = BrigadaInfo)))]
pub async fn get_brigada(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<BrigadaInfo>, AppError> {
    Ok(Json(state.brigades.get_brigada(id).await?.into()))
}

/// 查询班组成员
#[utoipa::path(get,
    path = "/brigades/{id}/employees",
    tag = "brigades",
    responses(
        (status = 200, description = "Employees of the brigada", body = Vec<EmployeeInfo>),
        (status = 404, description = "Brigada not found")
    )
)]
pub async fn find_brigada_employees(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<EmployeeInfo>>, AppError> {
    let employees = state.brigades.find_brigada_employees(id).await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post,
    path = "/brigades",
    tag = "brigades",
    request_body = BrigadaCreate,
    responses(
        (status = 201, description = "Created brigada", body = BrigadaInfo),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn create_brigada(
    State(state): State<AppState>,
    JsonBody(brigada): JsonBody<BrigadaCreate>,
) -> Result<(StatusCode, Json<BrigadaInfo>), AppError> {
    debug!("📝 创建班组 {:#?}", brigada);
    brigada.validate()?;

    let brigada = state.brigades.create_brigada(brigada.into()).await?;
    Ok((StatusCode::CREATED, Json(brigada.into())))
}

#[utoipa::path(patch, path = "/brigades/{id}", tag = "brigades", request_body = BrigadaUpdate,
    responses((status = 200, body = BrigadaInfo))
)]
pub async fn update_brigada(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(info): JsonBody<BrigadaUpdate>,
) -> Result<Json<BrigadaInfo>, AppError> {
    debug!("🔄 更新班组 {} {:#?}", id, info);
    info.validate()?;

    let brigada = state.brigades.update_brigada(id, info.into()).await?;
    Ok(Json(brigada.into()))
}

/// 删除班组
///
/// 班组下还有员工时返回 409
#[utoipa::path(delete,
    path = "/brigades/{id}",
    tag = "brigades",
    responses(
        (status = 200, body = BrigadaInfo),
        (status = 409, description = "Brigada still has employees")
    )
)]
pub async fn delete_brigada(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<BrigadaInfo>, AppError> {
    Ok(Json(state.brigades.delete_brigada(id).await?.into()))
}
