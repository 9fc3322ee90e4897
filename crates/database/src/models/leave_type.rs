//! 假期类型数据库模型

/// 假期类型信息
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaveTypeInfo {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// 假期类型创建参数
#[derive(Debug, Clone)]
pub struct LeaveTypeCreate {
    pub name: String,
    pub description: Option<String>,
}

/// 假期类型更新参数
#[derive(Debug, Clone, Default)]
pub struct LeaveTypeUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
