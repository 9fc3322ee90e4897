use crate::models::common::{not_blank, trim_optional};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 新建假期类型
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LeaveTypeCreate {
    #[schema(example = "Ежегодный отпуск")]
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    /// 假期类型名称，全局唯一
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// 更新假期类型，未提供的字段保持原值
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LeaveTypeUpdate {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct LeaveTypeInfo {
    #[schema(example = 2)]
    pub id: i32,
    #[schema(example = "Ежегодный отпуск")]
    pub name: String,
    pub description: Option<String>,
}

impl From<LeaveTypeCreate> for database::LeaveTypeCreate {
    fn from(value: LeaveTypeCreate) -> Self {
        Self {
            name: value.name.trim().to_string(),
            description: trim_optional(value.description),
        }
    }
}

impl From<LeaveTypeUpdate> for database::LeaveTypeUpdate {
    fn from(value: LeaveTypeUpdate) -> Self {
        Self {
            name: value.name.map(|n| n.trim().to_string()),
            description: trim_optional(value.description),
        }
    }
}

impl From<database::LeaveTypeInfo> for LeaveTypeInfo {
    fn from(value: database::LeaveTypeInfo) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}
