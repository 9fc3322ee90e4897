//! 服务类型数据库模型

/// 服务类型信息
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ServiceTypeInfo {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// 服务类型创建参数
#[derive(Debug, Clone)]
pub struct ServiceTypeCreate {
    pub name: String,
    pub description: Option<String>,
}

/// 服务类型更新参数
#[derive(Debug, Clone, Default)]
pub struct ServiceTypeUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
