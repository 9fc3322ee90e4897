//! 员工相关接口
//!

use crate::models::common::{JsonBody, ReplyList};
use crate::models::employee::{EmployeeCreate, EmployeeInfo, EmployeeSearch, EmployeeUpdate, PhotoUpload};
use crate::models::err::AppError;
use crate::AppState;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use validator::Validate;

/// 查询全部员工
#[utoipa::path(get, path = "/employees", tag = "employees", responses((status = 200, body = Vec<EmployeeInfo>)))]
pub async fn find_employees(State(state): State<AppState>) -> Result<Json<Vec<EmployeeInfo>>, AppError> {
    let employees = state.employees.find_employees().await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

/// 根据查询参数搜索员工
///
/// 根据查询参数搜索符合要求的员工列表，支持分页。
///
/// 查询参数由 [`EmployeeSearch`] 决定，关键字、班组、服务类型均为可选参数。
///
/// ## 返回值
///
/// [`ReplyList`] 中的 `total` 是分页之前的总数
#[utoipa::path(post,
    path = "/search-employees",
    tag = "employees",
    request_body = EmployeeSearch,
    responses(
        (status = 200, description = "Search results", body = ReplyList<EmployeeInfo>)
    ),
)]
pub async fn search_employees(
    State(state): State<AppState>,
    JsonBody(search): JsonBody<EmployeeSearch>,
) -> Result<Json<ReplyList<EmployeeInfo>>, AppError> {
    debug!("🔍 搜索员工 {:#?}", search);

    // 验证输入参数，确保有效性
    search.validate()?;

    let db_search = database::EmployeeSearch {
        keyword: search.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()).map(String::from),
        brigada_id: search.brigada_id,
        service_type_id: search.service_type_id,
        page_size: i64::from(search.page_query.page_size),
        offset: search.page_query.offset(),
    };
    let result = state.employees.search_employees(db_search).await?;

    Ok(Json(ReplyList {
        total: result.total,
        data: result.employees.into_iter().map(Into::into).collect(),
        page_size: search.page_query.page_size,
        page_index: search.page_query.page_index,
    }))
}

#[utoipa::path(get,
    path = "/employees/{id}",
    tag = "employees",
    responses(
        (status = 200, body = EmployeeInfo),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<EmployeeInfo>, AppError> {
    Ok(Json(state.employees.get_employee(id).await?.into()))
}

/// 创建员工
///
/// 工号重复返回 409，引用的服务类型、工种、班组、机车不存在返回 404
#[utoipa::path(post,
    path = "/employees",
    tag = "employees",
    request_body = EmployeeCreate,
    responses(
        (status = 201, description = "Created employee", body = EmployeeInfo),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced record not found"),
        (status = 409, description = "Personnel number already exists")
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    JsonBody(employee): JsonBody<EmployeeCreate>,
) -> Result<(StatusCode, Json<EmployeeInfo>), AppError> {
    debug!("📝 创建员工 {:#?}", employee);
    employee.validate()?;

    let employee = state.employees.create_employee(employee.into()).await?;
    Ok((StatusCode::CREATED, Json(employee.into())))
}

/// 更新员工信息
///
/// 根据 `id` 和修改信息 [`EmployeeUpdate`] 更新员工，未提供的字段保持原值
#[utoipa::path(patch, path = "/employees/{id}", tag = "employees", request_body = EmployeeUpdate,
    responses((status = 200, body = EmployeeInfo))
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(info): JsonBody<EmployeeUpdate>,
) -> Result<Json<EmployeeInfo>, AppError> {
    debug!("🔄 更新员工 {} {:#?}", id, info);
    info.validate()?;

    let employee = state.employees.update_employee(id, info.into()).await?;
    Ok(Json(employee.into()))
}

/// 删除员工，其假期一并删除
#[utoipa::path(delete, path = "/employees/{id}", tag = "employees", responses((status = 200, body = EmployeeInfo)))]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EmployeeInfo>, AppError> {
    Ok(Json(state.employees.delete_employee(id).await?.into()))
}

/// 上传员工照片
///
/// 使用 `multipart/form-data`，文件放在 `photo` 字段中。
/// 成功后员工的 `photo` 字段指向 `/uploads/` 下的新文件，旧照片被删除。
#[utoipa::path(post,
    path = "/employees/{id}/photo",
    tag = "employees",
    request_body(content = PhotoUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Employee with the new photo", body = EmployeeInfo),
        (status = 400, description = "Missing field or unsupported image type"),
        (status = 404, description = "Employee not found"),
        (status = 413, description = "Photo is too large")
    )
)]
pub async fn upload_employee_photo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<EmployeeInfo>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("photo") {
            continue;
        }

        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await?;
        debug!("🖼️ 收到员工 {} 的照片: {:?}, {} 字节", id, content_type, bytes.len());

        let employee = state
            .employees
            .upload_photo(id, content_type.as_deref(), &bytes)
            .await?;
        return Ok(Json(employee.into()));
    }

    Err(AppError::bad_request("Multipart field 'photo' is missing"))
}
