use crate::models::common::{not_blank, trim_optional};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// 工种列表的查询参数
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkTypeQuery {
    /// 只返回该服务类型下的工种
    pub service_type_id: Option<i32>,
}

/// 新建工种
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct WorkTypeCreate {
    #[schema(example = "Машинист")]
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    /// 工种名称，同一服务类型下唯一
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[schema(example = 1)]
    #[validate(range(min = 1))]
    /// 所属服务类型
    pub service_type_id: i32,
}

/// 更新工种，未提供的字段保持原值
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct WorkTypeUpdate {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(range(min = 1))]
    pub service_type_id: Option<i32>,
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct WorkTypeInfo {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub service_type_id: i32,
    pub service_type_name: String,
}

impl From<WorkTypeCreate> for database::WorkTypeCreate {
    fn from(value: WorkTypeCreate) -> Self {
        Self {
            name: value.name.trim().to_string(),
            description: trim_optional(value.description),
            service_type_id: value.service_type_id,
        }
    }
}

impl From<WorkTypeUpdate> for database::WorkTypeUpdate {
    fn from(value: WorkTypeUpdate) -> Self {
        Self {
            name: value.name.map(|n| n.trim().to_string()),
            description: trim_optional(value.description),
            service_type_id: value.service_type_id,
        }
    }
}

impl From<database::WorkTypeInfo> for WorkTypeInfo {
    fn from(value: database::WorkTypeInfo) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            service_type_id: value.service_type_id,
            service_type_name: value.service_type_name,
        }
    }
}
