//! 机车仓库 trait 定义

use crate::models::locomotive::{LocomotiveCreate, LocomotiveInfo, LocomotiveUpdate};
use crate::DatabaseResult;

/// 机车仓库trait定义
#[async_trait::async_trait]
pub trait LocomotiveRepositoryTrait: Send + Sync + 'static {
    /// 查询全部机车，按机车号排序
    async fn find_locomotives(&self) -> DatabaseResult<Vec<LocomotiveInfo>>;

    async fn get_locomotive_by_id(&self, id: i32) -> DatabaseResult<Option<LocomotiveInfo>>;

    /// 根据机车号精确查找，用于唯一性校验
    async fn find_locomotive_by_number(&self, number: &str) -> DatabaseResult<Option<LocomotiveInfo>>;

    /// 统计指定作业地点下的机车数量，删除作业地点前检查依赖
    async fn count_locomotives_by_location(&self, location_work_id: i32) -> DatabaseResult<i64>;

    async fn create_locomotive(&self, locomotive: LocomotiveCreate) -> DatabaseResult<LocomotiveInfo>;

    async fn update_locomotive(&self, id: i32, update: LocomotiveUpdate) -> DatabaseResult<Option<LocomotiveInfo>>;

    async fn delete_locomotive(&self, id: i32) -> DatabaseResult<Option<LocomotiveInfo>>;
}
