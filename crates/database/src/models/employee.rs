//! 员工数据库模型

use chrono::NaiveDate;

/// 员工信息
///
/// 外键对应的显示名称（班组、服务类型、工种、机车号）通过联表查询得到
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployeeInfo {
    pub id: i32,
    pub personnel_number: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub position: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
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

impl EmployeeInfo {
    /// 姓 名 父称，父称为空时省略
    pub fn full_name(&self) -> String {
        let mut name = format!("{} {}", self.last_name, self.first_name);
        if let Some(middle) = self.middle_name.as_deref().filter(|m| !m.is_empty()) {
            name.push(' ');
            name.push_str(middle);
        }
        name
    }
}

/// 员工搜索条件
#[derive(Debug, Clone, Default)]
pub struct EmployeeSearch {
    /// 姓名或工号关键字（模糊搜索，不区分大小写）
    pub keyword: Option<String>,
    pub brigada_id: Option<i32>,
    pub service_type_id: Option<i32>,
    pub page_size: i64,
    pub offset: i64,
}

/// 员工搜索结果
#[derive(Debug, Clone)]
pub struct EmployeeSearchResult {
    pub employees: Vec<EmployeeInfo>,
    pub total: u32,
}

/// 员工创建参数
#[derive(Debug, Clone)]
pub struct EmployeeCreate {
    pub personnel_number: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub position: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    pub service_type_id: Option<i32>,
    pub work_type_id: Option<i32>,
    pub brigada_id: Option<i32>,
    pub locomotive_id: Option<i32>,
}

/// 员工更新参数，`None` 表示保持原值
///
/// 外键字段为两层 `Option`：外层 `None` 保持原值，`Some(None)` 清空关联
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub personnel_number: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub hire_date: Option<NaiveDate>,
    pub service_type_id: Option<Option<i32>>,
    pub work_type_id: Option<Option<i32>>,
    pub brigada_id: Option<Option<i32>>,
    pub locomotive_id: Option<Option<i32>>,
}
