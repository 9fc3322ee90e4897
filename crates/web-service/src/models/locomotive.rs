use crate::models::common::{double_option, not_blank, trim_optional, validate_references};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// 新建机车
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LocomotiveCreate {
    #[schema(example = "ВЛ80С-2456")]
    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    /// 机车号，全局唯一
    pub number: String,

    #[schema(example = "ВЛ80С")]
    #[validate(length(max = 50))]
    pub series: Option<String>,

    #[validate(range(min = 1))]
    pub location_work_id: Option<i32>,

    #[validate(range(min = 1))]
    pub service_type_id: Option<i32>,

    #[validate(range(min = 1))]
    pub work_type_id: Option<i32>,
}

fn validate_locomotive_update(update: &LocomotiveUpdate) -> Result<(), ValidationError> {
    validate_references(&[update.location_work_id, update.service_type_id, update.work_type_id])
}

/// 更新机车，未提供的字段保持原值，关联字段传 `null` 表示解除关联
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[validate(schema(function = "validate_locomotive_update"))]
pub struct LocomotiveUpdate {
    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    pub number: Option<String>,

    #[validate(length(max = 50))]
    pub series: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub location_work_id: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub service_type_id: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub work_type_id: Option<Option<i32>>,
}

#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct LocomotiveInfo {
    pub id: i32,
    pub number: String,
    pub series: Option<String>,
    pub location_work_id: Option<i32>,
    pub location_work_name: Option<String>,
    pub service_type_id: Option<i32>,
    pub service_type_name: Option<String>,
    pub work_type_id: Option<i32>,
    pub work_type_name: Option<String>,
}

impl From<LocomotiveCreate> for database::LocomotiveCreate {
    fn from(value: LocomotiveCreate) -> Self {
        Self {
            number: value.number.trim().to_string(),
            series: trim_optional(value.series),
            location_work_id: value.location_work_id,
            service_type_id: value.service_type_id,
            work_type_id: value.work_type_id,
        }
    }
}

impl From<LocomotiveUpdate> for database::LocomotiveUpdate {
    fn from(value: LocomotiveUpdate) -> Self {
        Self {
            number: value.number.map(|n| n.trim().to_string()),
            series: trim_optional(value.series),
            location_work_id: value.location_work_id,
            service_type_id: value.service_type_id,
            work_type_id: value.work_type_id,
        }
    }
}

impl From<database::LocomotiveInfo> for LocomotiveInfo {
    fn from(value: database::LocomotiveInfo) -> Self {
        Self {
            id: value.id,
            number: value.number,
            series: value.series,
            location_work_id: value.location_work_id,
            location_work_name: value.location_work_name,
            service_type_id: value.service_type_id,
            service_type_name: value.service_type_name,
            work_type_id: value.work_type_id,
            work_type_name: value.work_type_name,
        }
    }
}
