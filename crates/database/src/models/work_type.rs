//! 工种数据库模型
//!
//! 工种隶属于某个服务类型，同一服务类型下名称唯一

/// 工种信息，附带所属服务类型名称
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkTypeInfo {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub service_type_id: i32,
    pub service_type_name: String,
}

/// 工种创建参数
#[derive(Debug, Clone)]
pub struct WorkTypeCreate {
    pub name: String,
    pub description: Option<String>,
    pub service_type_id: i32,
}

/// 工种更新参数
#[derive(Debug, Clone, Default)]
pub struct WorkTypeUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type_id: Option<i32>,
}
