use crate::models::common::{not_blank, trim_optional};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 新建服务类型
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ServiceTypeCreate {
    #[schema(example = "Электровозы")]
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    /// 服务类型名称，全局唯一
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// 更新服务类型，未提供的字段保持原值
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct ServiceTypeUpdate {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ServiceTypeInfo {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Электровозы")]
    pub name: String,
    pub description: Option<String>,
}

impl From<ServiceTypeCreate> for database::ServiceTypeCreate {
    fn from(value: ServiceTypeCreate) -> Self {
        Self {
            name: value.name.trim().to_string(),
            description: trim_optional(value.description),
        }
    }
}

impl From<ServiceTypeUpdate> for database::ServiceTypeUpdate {
    fn from(value: ServiceTypeUpdate) -> Self {
        Self {
            name: value.name.map(|n| n.trim().to_string()),
            description: trim_optional(value.description),
        }
    }
}

impl From<database::ServiceTypeInfo> for ServiceTypeInfo {
    fn from(value: database::ServiceTypeInfo) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}
