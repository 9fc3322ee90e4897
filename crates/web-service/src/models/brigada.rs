use crate::models::common::{not_blank, trim_optional};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 新建班组
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct BrigadaCreate {
    #[schema(example = "Бригада №1")]
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    /// 班组名称，全局唯一
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// 更新班组，未提供的字段保持原值
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct BrigadaUpdate {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct BrigadaInfo {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Бригада №1")]
    pub name: String,
    pub description: Option<String>,
}

impl From<BrigadaCreate> for database::BrigadaCreate {
    fn from(value: BrigadaCreate) -> Self {
        Self {
            name: value.name.trim().to_string(),
            description: trim_optional(value.description),
        }
    }
}

impl From<BrigadaUpdate> for database::BrigadaUpdate {
    fn from(value: BrigadaUpdate) -> Self {
        Self {
            name: value.name.map(|n| n.trim().to_string()),
            description: trim_optional(value.description),
        }
    }
}

impl From<database::BrigadaInfo> for BrigadaInfo {
    fn from(value: database::BrigadaInfo) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}
