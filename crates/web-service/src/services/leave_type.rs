//! 假期类型服务

use crate::models::err::{AppError, AppResult};
use crate::services::require;
use database::{
    LeaveRepositoryTrait, LeaveTypeCreate, LeaveTypeInfo, LeaveTypeRepositoryTrait, LeaveTypeUpdate, Repositories,
};
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct LeaveTypeService {
    leave_types: Arc<dyn LeaveTypeRepositoryTrait>,
    leaves: Arc<dyn LeaveRepositoryTrait>,
}

impl LeaveTypeService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            leave_types: repositories.leave_types.clone(),
            leaves: repositories.leaves.clone(),
        }
    }

    pub async fn find_leave_types(&self) -> AppResult<Vec<LeaveTypeInfo>> {
        Ok(self.leave_types.find_leave_types().await?)
    }

    pub async fn get_leave_type(&self, id: i32) -> AppResult<LeaveTypeInfo> {
        require(self.leave_types.get_leave_type_by_id(id).await?, "Leave type", id)
    }

    #[instrument(skip(self))]
    pub async fn create_leave_type(&self, leave_type: LeaveTypeCreate) -> AppResult<LeaveTypeInfo> {
        self.ensure_unique_name(&leave_type.name, None).await?;
        Ok(self.leave_types.create_leave_type(leave_type).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_leave_type(&self, id: i32, update: LeaveTypeUpdate) -> AppResult<LeaveTypeInfo> {
        self.get_leave_type(id).await?;
        if let Some(name) = &update.name {
            self.ensure_unique_name(name, Some(id)).await?;
        }
        require(self.leave_types.update_leave_type(id, update).await?, "Leave type", id)
    }

    /// 删除假期类型，仍被假期记录引用时拒绝删除
    #[instrument(skip(self))]
    pub async fn delete_leave_type(&self, id: i32) -> AppResult<LeaveTypeInfo> {
        let leave_type = self.get_leave_type(id).await?;

        let leaves = self.leaves.count_leaves_by_type(id).await?;
        if leaves > 0 {
            return Err(AppError::conflict(format!(
                "Leave type '{}' is used by {leaves} leave record(s)",
                leave_type.name
            )));
        }

        require(self.leave_types.delete_leave_type(id).await?, "Leave type", id)
    }

    async fn ensure_unique_name(&self, name: &str, current_id: Option<i32>) -> AppResult<()> {
        match self.leave_types.find_leave_type_by_name(name).await? {
            Some(existing) if Some(existing.id) != current_id => {
                Err(AppError::conflict(format!("Leave type '{name}' already exists")))
            }
            _ => Ok(()),
        }
    }
}
