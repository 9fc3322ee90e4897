//! 服务类型服务

use crate::models::err::{AppError, AppResult};
use crate::services::require;
use database::{Repositories, ServiceTypeCreate, ServiceTypeInfo, ServiceTypeRepositoryTrait, ServiceTypeUpdate};
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct ServiceTypeService {
    service_types: Arc<dyn ServiceTypeRepositoryTrait>,
}

impl ServiceTypeService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            service_types: repositories.service_types.clone(),
        }
    }

    pub async fn find_service_types(&self) -> AppResult<Vec<ServiceTypeInfo>> {
        Ok(self.service_types.find_service_types().await?)
    }

    pub async fn get_service_type(&self, id: i32) -> AppResult<ServiceTypeInfo> {
        require(self.service_types.get_service_type_by_id(id).await?, "Service type", id)
    }

    #[instrument(skip(self))]
    pub async fn create_service_type(&self, service_type: ServiceTypeCreate) -> AppResult<ServiceTypeInfo> {
        self.ensure_unique_name(&service_type.name, None).await?;
        Ok(self.service_types.create_service_type(service_type).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_service_type(&self, id: i32, update: ServiceTypeUpdate) -> AppResult<ServiceTypeInfo> {
        self.get_service_type(id).await?;
        if let Some(name) = &update.name {
            self.ensure_unique_name(name, Some(id)).await?;
        }
        require(self.service_types.update_service_type(id, update).await?, "Service type", id)
    }

    /// 删除服务类型，其下的工种级联删除，员工与机车上的引用置空
    #[instrument(skip(self))]
    pub async fn delete_service_type(&self, id: i32) -> AppResult<ServiceTypeInfo> {
        require(self.service_types.delete_service_type(id).await?, "Service type", id)
    }

    async fn ensure_unique_name(&self, name: &str, current_id: Option<i32>) -> AppResult<()> {
        match self.service_types.find_service_type_by_name(name).await? {
            Some(existing) if Some(existing.id) != current_id => {
                Err(AppError::conflict(format!("Service type '{name}' already exists")))
            }
            _ => Ok(()),
        }
    }
}
