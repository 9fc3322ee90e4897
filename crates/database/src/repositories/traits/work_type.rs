//! 工种仓库 trait 定义

use crate::models::work_type::{WorkTypeCreate, WorkTypeInfo, WorkTypeUpdate};
use crate::DatabaseResult;

/// 工种仓库trait定义
#[async_trait::async_trait]
pub trait WorkTypeRepositoryTrait: Send + Sync + 'static {
    /// 查询工种列表
    ///
    /// # 参数
    /// - `service_type_id`: 可选，只返回该服务类型下的工种
    async fn find_work_types(&self, service_type_id: Option<i32>) -> DatabaseResult<Vec<WorkTypeInfo>>;

    async fn get_work_type_by_id(&self, id: i32) -> DatabaseResult<Option<WorkTypeInfo>>;

    /// 在指定服务类型下按名称查找工种，用于唯一性校验
    async fn find_work_type_by_name(&self, service_type_id: i32, name: &str) -> DatabaseResult<Option<WorkTypeInfo>>;

    /// 统计引用该工种的员工与机车数量，工种改挂到其他服务类型前检查
    async fn count_work_type_references(&self, id: i32) -> DatabaseResult<i64>;

    async fn create_work_type(&self, work_type: WorkTypeCreate) -> DatabaseResult<WorkTypeInfo>;

    async fn update_work_type(&self, id: i32, update: WorkTypeUpdate) -> DatabaseResult<Option<WorkTypeInfo>>;

    async fn delete_work_type(&self, id: i32) -> DatabaseResult<Option<WorkTypeInfo>>;
}
