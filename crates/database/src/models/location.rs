//! 作业地点数据库模型

/// 作业地点信息
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LocationInfo {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// 作业地点创建参数
#[derive(Debug, Clone)]
pub struct LocationCreate {
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// 作业地点更新参数
#[derive(Debug, Clone, Default)]
pub struct LocationUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}
