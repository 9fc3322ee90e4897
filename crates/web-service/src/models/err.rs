use crate::models::leave::LeaveInfo;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use color_eyre::eyre::Error;
use database::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据验证错误，这种错误通常都是用户参数不正确导致的，所以需要转换为400
    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    /// 仓库层数据库错误
    #[error(transparent)]
    RepositoryError(#[from] DatabaseError),

    /// 资源不存在
    #[error("{0}")]
    NotFound(String),

    /// 唯一性冲突，或者删除时仍有依赖数据
    #[error("{0}")]
    Conflict(String),

    /// 假期区间与同一员工的已有假期冲突
    #[error("{message}")]
    LeaveConflict { message: String, conflicts: Vec<LeaveInfo> },

    /// 无法通过声明式校验表达的参数错误
    #[error("{0}")]
    BadRequest(String),

    /// 上传内容超过限制
    #[error("{0}")]
    PayloadTooLarge(String),

    /// 请求体不是合法的 JSON，或字段类型不匹配（例如非法日期）
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    /// 查询参数解析失败
    #[error(transparent)]
    QueryRejection(#[from] QueryRejection),

    /// multipart 解析错误
    #[error(transparent)]
    Multipart(#[from] MultipartError),

    /// 照片文件读写错误
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// 其他类型错误
    #[error(transparent)]
    InternalError(#[from] Error),
}

/// Web 层结果类型
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// 按 "实体 + ID" 生成统一的 404 错误
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{entity} with id {id} not found"))
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn bad_request<T: Into<String>>(msg: T) -> Self {
        Self::BadRequest(msg.into())
    }

    /// 对应的http状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_) | AppError::BadRequest(_) | AppError::QueryRejection(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::JsonRejection(JsonRejection::MissingJsonContentType(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::JsonRejection(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::LeaveConflict { .. } => StatusCode::CONFLICT,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Multipart(err) => err.status(),
            AppError::RepositoryError(err) => match err {
                DatabaseError::SqlxError(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
                // 并发写入时服务层的预检查可能被绕过，由数据库约束兜底
                err if err.is_unique_violation() || err.is_foreign_key_violation() || err.is_exclusion_violation() => {
                    StatusCode::CONFLICT
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Io(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("❌ 请求处理失败: {:?}", self);
        }

        match self {
            AppError::ValidationFailed(err) => {
                (status, Json(json!({ "error": format!("Validate failed: {err}"), "fields": err }))).into_response()
            }
            AppError::LeaveConflict { message, conflicts } => {
                (status, Json(json!({ "error": message, "conflicts": conflicts }))).into_response()
            }
            AppError::RepositoryError(err) => {
                let message = match status {
                    StatusCode::NOT_FOUND => format!("Record not found: {err}"),
                    StatusCode::CONFLICT => format!("Constraint violated: {err}"),
                    _ => format!("Repository error: {err}"),
                };
                (status, Json(json!({ "error": message }))).into_response()
            }
            AppError::JsonRejection(err) => (status, Json(json!({ "error": err.body_text() }))).into_response(),
            AppError::QueryRejection(err) => (status, Json(json!({ "error": err.body_text() }))).into_response(),
            AppError::Multipart(err) => (status, Json(json!({ "error": err.body_text() }))).into_response(),
            AppError::Io(err) => (status, Json(json!({ "error": format!("File error: {err}") }))).into_response(),
            AppError::InternalError(err) => {
                (status, Json(json!({ "error": format!("Something went wrong: {err}") }))).into_response()
            }
            other => (status, Json(json!({ "error": other.to_string() }))).into_response(),
        }
    }
}
