//! 服务类型仓库 trait 定义

use crate::models::service_type::{ServiceTypeCreate, ServiceTypeInfo, ServiceTypeUpdate};
use crate::DatabaseResult;

/// 服务类型仓库trait定义
#[async_trait::async_trait]
pub trait ServiceTypeRepositoryTrait: Send + Sync + 'static {
    /// 查询全部服务类型，按名称排序
    async fn find_service_types(&self) -> DatabaseResult<Vec<ServiceTypeInfo>>;

    /// 根据 ID 获取服务类型，不存在时返回 `None`
    async fn get_service_type_by_id(&self, id: i32) -> DatabaseResult<Option<ServiceTypeInfo>>;

    /// 根据名称精确查找服务类型，用于唯一性校验
    async fn find_service_type_by_name(&self, name: &str) -> DatabaseResult<Option<ServiceTypeInfo>>;

    async fn create_service_type(&self, service_type: ServiceTypeCreate) -> DatabaseResult<ServiceTypeInfo>;

    /// 更新服务类型，`None` 字段保持原值
    async fn update_service_type(&self, id: i32, update: ServiceTypeUpdate) -> DatabaseResult<Option<ServiceTypeInfo>>;

    /// 删除服务类型，返回被删除的记录
    async fn delete_service_type(&self, id: i32) -> DatabaseResult<Option<ServiceTypeInfo>>;
}
