//! 假期仓库 trait 定义
//!
//! 所有按日期的查询都以调用方传入的 `today` 为基准，而不是数据库的 `current_date`，
//! 这样服务层可以统一使用本地时区的当天零点。

use crate::models::leave::{LeaveCreate, LeaveFilter, LeaveInfo, LeaveStatistics, LeaveUpdate};
use crate::DatabaseResult;
use chrono::NaiveDate;

/// 假期仓库trait定义
#[async_trait::async_trait]
pub trait LeaveRepositoryTrait: Send + Sync + 'static {
    /// 按过滤条件查询假期，按开始日期倒序
    async fn find_leaves(&self, filter: LeaveFilter) -> DatabaseResult<Vec<LeaveInfo>>;

    async fn get_leave_by_id(&self, id: i32) -> DatabaseResult<Option<LeaveInfo>>;

    /// 查询与 `[start_date, end_date]` 有交集的同一员工的假期
    ///
    /// # 参数
    /// - `exclude_id`: 编辑时排除假期自身
    async fn find_overlapping_leaves(
        &self,
        employee_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> DatabaseResult<Vec<LeaveInfo>>;

    /// 当天处于假期区间内的假期
    async fn find_active_leaves(&self, today: NaiveDate) -> DatabaseResult<Vec<LeaveInfo>>;

    /// 开始日期晚于当天的假期，按开始日期升序
    async fn find_upcoming_leaves(&self, today: NaiveDate) -> DatabaseResult<Vec<LeaveInfo>>;

    /// 今日假期：处于区间内，或任一端点落在 `[today, today + 1)` 内
    async fn find_leaves_for_day(&self, today: NaiveDate) -> DatabaseResult<Vec<LeaveInfo>>;

    async fn leave_statistics(&self, today: NaiveDate) -> DatabaseResult<LeaveStatistics>;

    /// 统计使用某个假期类型的假期数量，删除假期类型前检查依赖
    async fn count_leaves_by_type(&self, leave_type_id: i32) -> DatabaseResult<i64>;

    async fn create_leave(&self, leave: LeaveCreate) -> DatabaseResult<LeaveInfo>;

    async fn update_leave(&self, id: i32, update: LeaveUpdate) -> DatabaseResult<Option<LeaveInfo>>;

    async fn delete_leave(&self, id: i32) -> DatabaseResult<Option<LeaveInfo>>;
}
