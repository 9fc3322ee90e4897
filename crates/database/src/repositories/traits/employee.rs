//! 员工仓库 trait 定义

use crate::models::employee::{EmployeeCreate, EmployeeInfo, EmployeeSearch, EmployeeSearchResult, EmployeeUpdate};
use crate::DatabaseResult;

/// 员工仓库trait定义
///
/// 除了常规的增删改查，还提供：
/// - 分页搜索
/// - 照片路径更新
/// - 班组/机车的依赖计数（删除班组、机车前检查）
#[async_trait::async_trait]
pub trait EmployeeRepositoryTrait: Send + Sync + 'static {
    /// 查询全部员工，按姓名排序
    async fn find_employees(&self) -> DatabaseResult<Vec<EmployeeInfo>>;

    /// 根据查询参数分页搜索员工
    ///
    /// # 返回值
    /// 返回包含员工列表和总数的结果 [`EmployeeSearchResult`]
    async fn search_employees(&self, search: EmployeeSearch) -> DatabaseResult<EmployeeSearchResult>;

    /// 查询指定班组的全部员工
    async fn find_employees_by_brigada(&self, brigada_id: i32) -> DatabaseResult<Vec<EmployeeInfo>>;

    async fn get_employee_by_id(&self, id: i32) -> DatabaseResult<Option<EmployeeInfo>>;

    /// 根据工号精确查找，用于唯一性校验
    async fn find_employee_by_personnel_number(&self, personnel_number: &str) -> DatabaseResult<Option<EmployeeInfo>>;

    async fn count_employees_by_brigada(&self, brigada_id: i32) -> DatabaseResult<i64>;

    async fn count_employees_by_locomotive(&self, locomotive_id: i32) -> DatabaseResult<i64>;

    async fn create_employee(&self, employee: EmployeeCreate) -> DatabaseResult<EmployeeInfo>;

    /// 更新员工信息，`None` 字段保持原值
    async fn update_employee(&self, id: i32, update: EmployeeUpdate) -> DatabaseResult<Option<EmployeeInfo>>;

    /// 设置员工照片的访问路径
    async fn update_employee_photo(&self, id: i32, photo: &str) -> DatabaseResult<Option<EmployeeInfo>>;

    /// 删除员工，其假期记录由外键级联删除
    async fn delete_employee(&self, id: i32) -> DatabaseResult<Option<EmployeeInfo>>;
}
