use crate::models::common::{not_blank, trim_optional};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 新建作业地点
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LocationCreate {
    #[schema(example = "Депо Северное")]
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    /// 作业地点名称，全局唯一
    pub name: String,

    #[validate(length(max = 255))]
    pub address: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// 更新作业地点，未提供的字段保持原值
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LocationUpdate {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: Option<String>,

    #[validate(length(max = 255))]
    pub address: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct LocationInfo {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
}

impl From<LocationCreate> for database::LocationCreate {
    fn from(value: LocationCreate) -> Self {
        Self {
            name: value.name.trim().to_string(),
            address: trim_optional(value.address),
            description: trim_optional(value.description),
        }
    }
}

impl From<LocationUpdate> for database::LocationUpdate {
    fn from(value: LocationUpdate) -> Self {
        Self {
            name: value.name.map(|n| n.trim().to_string()),
            address: trim_optional(value.address),
            description: trim_optional(value.description),
        }
    }
}

impl From<database::LocationInfo> for LocationInfo {
    fn from(value: database::LocationInfo) -> Self {
        Self {
            id: value.id,
            name: value.name,
            address: value.address,
            description: value.description,
        }
    }
}
