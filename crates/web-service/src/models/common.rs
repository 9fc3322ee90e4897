use crate::models::err::AppError;
use axum::extract::{FromRequest, FromRequestParts};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// JSON 请求体
///
/// 与 [`axum::Json`] 相同，解析失败时返回 [`AppError`] 的 JSON 错误体
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// 查询参数，解析失败时返回 [`AppError`] 的 JSON 错误体
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// 分页查询信息
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct PageQuery {
    #[schema(example = 1)]
    #[validate(range(min = 1))]
    /// 分页查询的开始页数
    pub page_index: u32,

    #[schema(example = 20)]
    #[validate(range(min = 1, max = 100))]
    /// 分页查询的每页大小
    pub page_size: u32,
}

impl PageQuery {
    /// 计算偏移量，saturating_sub(1)会保证结果>=0，不会出现溢出
    pub fn offset(&self) -> i64 {
        i64::from(self.page_index.saturating_sub(1)) * i64::from(self.page_size)
    }
}

/// 封装符合json-api的列表对象
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ReplyList<T> {
    pub data: Vec<T>,
    #[schema(example = 146)]
    /// 分页查询总数
    pub total: u32,

    #[schema(example = 20)]
    /// 分页查询的每页大小
    pub page_size: u32,

    #[schema(example = 1)]
    /// 分页查询的开始页数
    pub page_index: u32,
}

/// 拒绝只包含空白字符的文本
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// 去掉首尾空白，空字符串视为未填写
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// 可清空字段的反序列化
///
/// 配合 `#[serde(default)]` 使用：字段缺失为 `None`，显式 `null` 为 `Some(None)`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// 外键 ID 提供时必须为正数，`null` 表示清空
pub fn validate_references(references: &[Option<Option<i32>>]) -> Result<(), ValidationError> {
    if references.iter().any(|r| matches!(r, Some(Some(id)) if *id < 1)) {
        return Err(ValidationError::new("reference").with_message("referenced ids must be positive".into()));
    }
    Ok(())
}
