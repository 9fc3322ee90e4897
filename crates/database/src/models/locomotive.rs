//! 机车数据库模型

/// 机车信息
///
/// 关联的作业地点、服务类型、工种名称通过联表查询得到
#[derive(Debug, Clone, sqlx::FromRow)]
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

/// 机车创建参数
#[derive(Debug, Clone)]
pub struct LocomotiveCreate {
    pub number: String,
    pub series: Option<String>,
    pub location_work_id: Option<i32>,
    pub service_type_id: Option<i32>,
    pub work_type_id: Option<i32>,
}

/// 机车更新参数
///
/// 外键字段外层 `None` 保持原值，`Some(None)` 清空关联
#[derive(Debug, Clone, Default)]
pub struct LocomotiveUpdate {
    pub number: Option<String>,
    pub series: Option<String>,
    pub location_work_id: Option<Option<i32>>,
    pub service_type_id: Option<Option<i32>>,
    pub work_type_id: Option<Option<i32>>,
}
