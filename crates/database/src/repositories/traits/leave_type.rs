//! 假期类型仓库 trait 定义

use crate::models::leave_type::{LeaveTypeCreate, LeaveTypeInfo, LeaveTypeUpdate};
use crate::DatabaseResult;

/// 假期类型仓库trait定义
#[async_trait::async_trait]
pub trait LeaveTypeRepositoryTrait: Send + Sync + 'static {
    async fn find_leave_types(&self) -> DatabaseResult<Vec<LeaveTypeInfo>>;

    async fn get_leave_type_by_id(&self, id: i32) -> DatabaseResult<Option<LeaveTypeInfo>>;

    async fn find_leave_type_by_name(&self, name: &str) -> DatabaseResult<Option<LeaveTypeInfo>>;

    async fn create_leave_type(&self, leave_type: LeaveTypeCreate) -> DatabaseResult<LeaveTypeInfo>;

    async fn update_leave_type(&self, id: i32, update: LeaveTypeUpdate) -> DatabaseResult<Option<LeaveTypeInfo>>;

    async fn delete_leave_type(&self, id: i32) -> DatabaseResult<Option<LeaveTypeInfo>>;
}
