//! 工种服务

use crate::models::err::{AppError, AppResult};
use crate::services::require;
use database::{
    Repositories, ServiceTypeRepositoryTrait, WorkTypeCreate, WorkTypeInfo, WorkTypeRepositoryTrait, WorkTypeUpdate,
};
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct WorkTypeService {
    work_types: Arc<dyn WorkTypeRepositoryTrait>,
    service_types: Arc<dyn ServiceTypeRepositoryTrait>,
}

impl WorkTypeService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            work_types: repositories.work_types.clone(),
            service_types: repositories.service_types.clone(),
        }
    }

    pub async fn find_work_types(&self, service_type_id: Option<i32>) -> AppResult<Vec<WorkTypeInfo>> {
        Ok(self.work_types.find_work_types(service_type_id).await?)
    }

    pub async fn get_work_type(&self, id: i32) -> AppResult<WorkTypeInfo> {
        require(self.work_types.get_work_type_by_id(id).await?, "Work type", id)
    }

    #[instrument(skip(self))]
    pub async fn create_work_type(&self, work_type: WorkTypeCreate) -> AppResult<WorkTypeInfo> {
        self.ensure_service_type(work_type.service_type_id).await?;
        self.ensure_unique_name(work_type.service_type_id, &work_type.name, None).await?;
        Ok(self.work_types.create_work_type(work_type).await?)
    }

    /// 更新工种
    ///
    /// 名称或服务类型任一变化时，都要按合并后的 (服务类型, 名称) 重新检查唯一性。
    /// 仍被员工或机车引用的工种不能改挂到其他服务类型
    #[instrument(skip(self))]
    pub async fn update_work_type(&self, id: i32, update: WorkTypeUpdate) -> AppResult<WorkTypeInfo> {
        let current = self.get_work_type(id).await?;

        if let Some(service_type_id) = update.service_type_id.filter(|s| *s != current.service_type_id) {
            self.ensure_service_type(service_type_id).await?;
            let references = self.work_types.count_work_type_references(id).await?;
            if references > 0 {
                return Err(AppError::conflict(format!(
                    "Work type '{}' is still used by {references} employee(s) or locomotive(s)",
                    current.name
                )));
            }
        }
        if update.name.is_some() || update.service_type_id.is_some() {
            let service_type_id = update.service_type_id.unwrap_or(current.service_type_id);
            let name = update.name.as_deref().unwrap_or(&current.name);
            self.ensure_unique_name(service_type_id, name, Some(id)).await?;
        }

        require(self.work_types.update_work_type(id, update).await?, "Work type", id)
    }

    #[instrument(skip(self))]
    pub async fn delete_work_type(&self, id: i32) -> AppResult<WorkTypeInfo> {
        require(self.work_types.delete_work_type(id).await?, "Work type", id)
    }

    async fn ensure_service_type(&self, service_type_id: i32) -> AppResult<()> {
        require(
            self.service_types.get_service_type_by_id(service_type_id).await?,
            "Service type",
            service_type_id,
        )?;
        Ok(())
    }

    async fn ensure_unique_name(&self, service_type_id: i32, name: &str, current_id: Option<i32>) -> AppResult<()> {
        match self.work_types.find_work_type_by_name(service_type_id, name).await? {
            Some(existing) if Some(existing.id) != current_id => Err(AppError::conflict(format!(
                "Work type '{name}' already exists in service type '{}'",
                existing.service_type_name
            ))),
            _ => Ok(()),
        }
    }
}
