//! 班组数据库模型

/// 班组信息
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BrigadaInfo {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// 班组创建参数
#[derive(Debug, Clone)]
pub struct BrigadaCreate {
    pub name: String,
    pub description: Option<String>,
}

/// 班组更新参数
#[derive(Debug, Clone, Default)]
pub struct BrigadaUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
