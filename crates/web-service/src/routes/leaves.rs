//! 假期相关接口
//!
//! 返回的假期都带有以当天为基准的 `status` 与 `days` 字段

use crate::models::common::{JsonBody, QueryParams};
use crate::models::err::AppError;
use crate::models::leave::{
    ConflictCheck, ConflictReport, LeaveCreate, LeaveInfo, LeaveQuery, LeaveStatistics, LeaveUpdate,
};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use validator::Validate;

/// 查询假期
///
/// 支持按员工、假期类型过滤，`from`/`to` 返回与该日期窗口有交集的假期
#[utoipa::path(get,
    path = "/leaves",
    tag = "leaves",
    params(LeaveQuery),
    responses(
        (status = 200, description = "Leaves, newest first", body = Vec<LeaveInfo>),
        (status = 400, description = "Window start is after window end")
    ),
)]
pub async fn find_leaves(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<LeaveQuery>,
) -> Result<Json<Vec<LeaveInfo>>, AppError> {
    debug!("🔍 查询假期 {:#?}", query);
    let leaves = state.leaves.find_leaves(query.into()).await?;
    Ok(Json(LeaveInfo::from_records(leaves, state.leaves.today())))
}

#[utoipa::path(get,
    path = "/leaves/{id}",
    tag = "leaves",
    responses(
        (status = 200, body = LeaveInfo),
        (status = 404, description = "Leave not found")
    )
)]
pub async fn get_leave(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<LeaveInfo>, AppError> {
    let leave = state.leaves.get_leave(id).await?;
    Ok(Json(LeaveInfo::from_record(leave, state.leaves.today())))
}

/// 某个员工的全部假期
#[utoipa::path(get,
    path = "/employees/{id}/leaves",
    tag = "leaves",
    responses(
        (status = 200, body = Vec<LeaveInfo>),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn find_employee_leaves(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<LeaveInfo>>, AppError> {
    let leaves = state.leaves.find_employee_leaves(id).await?;
    Ok(Json(LeaveInfo::from_records(leaves, state.leaves.today())))
}

/// 正在进行中的假期
#[utoipa::path(get, path = "/leaves/active", tag = "leaves", responses((status = 200, body = Vec<LeaveInfo>)))]
pub async fn find_active_leaves(State(state): State<AppState>) -> Result<Json<Vec<LeaveInfo>>, AppError> {
    let leaves = state.leaves.find_active_leaves().await?;
    Ok(Json(LeaveInfo::from_records(leaves, state.leaves.today())))
}

/// 尚未开始的假期
#[utoipa::path(get, path = "/leaves/upcoming", tag = "leaves", responses((status = 200, body = Vec<LeaveInfo>)))]
pub async fn find_upcoming_leaves(State(state): State<AppState>) -> Result<Json<Vec<LeaveInfo>>, AppError> {
    let leaves = state.leaves.find_upcoming_leaves().await?;
    Ok(Json(LeaveInfo::from_records(leaves, state.leaves.today())))
}

/// 今日假期
///
/// 当天处于假期内，或者假期在当天开始、结束
#[utoipa::path(get, path = "/leaves/today", tag = "leaves", responses((status = 200, body = Vec<LeaveInfo>)))]
pub async fn find_today_leaves(State(state): State<AppState>) -> Result<Json<Vec<LeaveInfo>>, AppError> {
    let leaves = state.leaves.find_today_leaves().await?;
    Ok(Json(LeaveInfo::from_records(leaves, state.leaves.today())))
}

#[utoipa::path(get, path = "/leaves/statistics", tag = "leaves", responses((status = 200, body = LeaveStatistics)))]
pub async fn leave_statistics(State(state): State<AppState>) -> Result<Json<LeaveStatistics>, AppError> {
    let statistics = state.leaves.leave_statistics().await?;
    Ok(Json(LeaveStatistics::from_record(statistics, state.leaves.today())))
}

/// 冲突预检查
///
/// 不写入任何数据，返回与给定区间相交的该员工的假期。
/// 编辑已有假期时通过 `exclude_id` 排除其自身。
#[utoipa::path(post,
    path = "/leaves/check-conflicts",
    tag = "leaves",
    request_body = ConflictCheck,
    responses(
        (status = 200, description = "Overlapping leaves", body = ConflictReport),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn check_leave_conflicts(
    State(state): State<AppState>,
    JsonBody(check): JsonBody<ConflictCheck>,
) -> Result<Json<ConflictReport>, AppError> {
    check.validate()?;

    let conflicts = state
        .leaves
        .check_conflicts(check.employee_id, check.start_date, check.end_date, check.exclude_id)
        .await?;
    Ok(Json(ConflictReport {
        has_conflicts: !conflicts.is_empty(),
        conflicts: LeaveInfo::from_records(conflicts, state.leaves.today()),
    }))
}

/// 创建假期
///
/// 与该员工已有假期相交时返回 409，响应体的 `conflicts` 列出全部冲突的假期
#[utoipa::path(post,
    path = "/leaves",
    tag = "leaves",
    request_body = LeaveCreate,
    responses(
        (status = 201, description = "Created leave", body = LeaveInfo),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Employee or leave type not found"),
        (status = 409, description = "Overlaps existing leaves")
    )
)]
pub async fn create_leave(
    State(state): State<AppState>,
    JsonBody(leave): JsonBody<LeaveCreate>,
) -> Result<(StatusCode, Json<LeaveInfo>), AppError> {
    debug!("📝 创建假期 {:#?}", leave);
    leave.validate()?;

    let leave = state.leaves.create_leave(leave.into()).await?;
    Ok((StatusCode::CREATED, Json(LeaveInfo::from_record(leave, state.leaves.today()))))
}

/// 更新假期
///
/// 冲突检查会排除当前假期本身
#[utoipa::path(patch,
    path = "/leaves/{id}",
    tag = "leaves",
    request_body = LeaveUpdate,
    responses(
        (status = 200, body = LeaveInfo),
        (status = 409, description = "Overlaps existing leaves")
    )
)]
pub async fn update_leave(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(info): JsonBody<LeaveUpdate>,
) -> Result<Json<LeaveInfo>, AppError> {
    debug!("🔄 更新假期 {} {:#?}", id, info);
    info.validate()?;

    let leave = state.leaves.update_leave(id, info.into()).await?;
    Ok(Json(LeaveInfo::from_record(leave, state.leaves.today())))
}

#[utoipa::path(delete, path = "/leaves/{id}", tag = "leaves", responses((status = 200, body = LeaveInfo)))]
pub async fn delete_leave(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<LeaveInfo>, AppError> {
    let leave = state.leaves.delete_leave(id).await?;
    Ok(Json(LeaveInfo::from_record(leave, state.leaves.today())))
}
