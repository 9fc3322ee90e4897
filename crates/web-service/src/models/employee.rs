use crate::models::common::{double_option, not_blank, trim_optional, validate_references, PageQuery};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// 搜索员工列表信息
///
/// - `keyword`为可选参数，同时匹配姓、名、父称和工号
/// - `brigada_id`、`service_type_id`为可选过滤条件
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct EmployeeSearch {
    #[schema(example = "Иван")]
    #[validate(length(min = 1, max = 100))]
    pub keyword: Option<String>,

    #[validate(range(min = 1))]
    pub brigada_id: Option<i32>,

    #[validate(range(min = 1))]
    pub service_type_id: Option<i32>,

    /// 查询分页信息
    #[validate(nested)]
    pub page_query: PageQuery,
}

/// 新建员工
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct EmployeeCreate {
    #[schema(example = "004512")]
    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    /// 工号，全局唯一
    pub personnel_number: String,

    #[schema(example = "Иванов")]
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub last_name: String,

    #[schema(example = "Иван")]
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub first_name: String,

    #[validate(length(max = 100))]
    pub middle_name: Option<String>,

    #[schema(example = "Машинист")]
    #[validate(length(min = 1, max = 150), custom(function = "not_blank"))]
    pub position: String,

    #[schema(example = "+7 900 000-00-00")]
    #[validate(length(max = 30))]
    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,

    #[validate(range(min = 1))]
    pub service_type_id: Option<i32>,

    #[validate(range(min = 1))]
    pub work_type_id: Option<i32>,

    #[validate(range(min = 1))]
    pub brigada_id: Option<i32>,

    #[validate(range(min = 1))]
    pub locomotive_id: Option<i32>,
}

fn validate_employee_update(update: &EmployeeUpdate) -> Result<(), ValidationError> {
    validate_references(&[update.service_type_id, update.work_type_id, update.brigada_id, update.locomotive_id])
}

/// 更新员工，未提供的字段保持原值
///
/// 关联字段传 `null` 表示解除关联，例如调离班组
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[validate(schema(function = "validate_employee_update"))]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    pub personnel_number: Option<String>,

    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub last_name: Option<String>,

    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub first_name: Option<String>,

    #[validate(length(max = 100))]
    pub middle_name: Option<String>,

    #[validate(length(min = 1, max = 150), custom(function = "not_blank"))]
    pub position: Option<String>,

    #[validate(length(max = 30))]
    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub service_type_id: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub work_type_id: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub brigada_id: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub locomotive_id: Option<Option<i32>>,
}

/// 员工信息
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct EmployeeInfo {
    #[schema(example = 15)]
    pub id: i32,
    pub personnel_number: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    /// 姓 名 父称
    pub full_name: String,
    pub position: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    /// 照片访问路径，例如 `/uploads/xxx.jpg`
    pub photo: Option<String>,
    pub service_type_id: Option<i32>,
    pub service_type_name: Option<String>,
    pub work_type_id: Option<i32>,
    pub work_type_name: Option<String>,
    pub brigada_id: Option<i32>,
    pub brigada_name: Option<String>,
    pub locomotive_id: Option<i32>,
    pub locomotive_number: Option<String>,
}

impl From<EmployeeCreate> for database::EmployeeCreate {
    fn from(value: EmployeeCreate) -> Self {
        Self {
            personnel_number: value.personnel_number.trim().to_string(),
            last_name: value.last_name.trim().to_string(),
            first_name: value.first_name.trim().to_string(),
            middle_name: trim_optional(value.middle_name),
            position: value.position.trim().to_string(),
            phone: trim_optional(value.phone),
            birth_date: value.birth_date,
            hire_date: value.hire_date,
            service_type_id: value.service_type_id,
            work_type_id: value.work_type_id,
            brigada_id: value.brigada_id,
            locomotive_id: value.locomotive_id,
        }
    }
}

impl From<EmployeeUpdate> for database::EmployeeUpdate {
    fn from(value: EmployeeUpdate) -> Self {
        Self {
            personnel_number: value.personnel_number.map(|v| v.trim().to_string()),
            last_name: value.last_name.map(|v| v.trim().to_string()),
            first_name: value.first_name.map(|v| v.trim().to_string()),
            middle_name: trim_optional(value.middle_name),
            position: value.position.map(|v| v.trim().to_string()),
            phone: trim_optional(value.phone),
            birth_date: value.birth_date,
            hire_date: value.hire_date,
            service_type_id: value.service_type_id,
            work_type_id: value.work_type_id,
            brigada_id: value.brigada_id,
            locomotive_id: value.locomotive_id,
        }
    }
}

impl From<database::EmployeeInfo> for EmployeeInfo {
    fn from(value: database::EmployeeInfo) -> Self {
        let full_name = value.full_name();
        Self {
            id: value.id,
            personnel_number: value.personnel_number,
            last_name: value.last_name,
            first_name: value.first_name,
            middle_name: value.middle_name,
            full_name,
            position: value.position,
            phone: value.phone,
            birth_date: value.birth_date,
            hire_date: value.hire_date,
            photo: value.photo,
            service_type_id: value.service_type_id,
            service_type_name: value.service_type_name,
            work_type_id: value.work_type_id,
            work_type_name: value.work_type_name,
            brigada_id: value.brigada_id,
            brigada_name: value.brigada_name,
            locomotive_id: value.locomotive_id,
            locomotive_number: value.locomotive_number,
        }
    }
}

/// 照片上传表单，字段名为 `photo`
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct PhotoUpload {
    /// JPEG、PNG 或 WebP 图片
    #[schema(value_type = String, format = Binary)]
    pub photo: Vec<u8>,
}
