//! 机车服务
//!
//! 机车号全局唯一；作业地点、服务类型、工种必须存在，
//! 同时给出服务类型和工种时，工种必须属于该服务类型

use crate::models::err::{AppError, AppResult};
use crate::services::require;
use database::{
    EmployeeRepositoryTrait, LocationRepositoryTrait, LocomotiveCreate, LocomotiveInfo, LocomotiveRepositoryTrait,
    LocomotiveUpdate, Repositories, ServiceTypeRepositoryTrait, WorkTypeRepositoryTrait,
};
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct LocomotiveService {
    locomotives: Arc<dyn LocomotiveRepositoryTrait>,
    locations: Arc<dyn LocationRepositoryTrait>,
    service_types: Arc<dyn ServiceTypeRepositoryTrait>,
    work_types: Arc<dyn WorkTypeRepositoryTrait>,
    employees: Arc<dyn EmployeeRepositoryTrait>,
}

impl LocomotiveService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            locomotives: repositories.locomotives.clone(),
            locations: repositories.locations.clone(),
            service_types: repositories.service_types.clone(),
            work_types: repositories.work_types.clone(),
            employees: repositories.employees.clone(),
        }
    }

    pub async fn find_locomotives(&self) -> AppResult<Vec<LocomotiveInfo>> {
        Ok(self.locomotives.find_locomotives().await?)
    }

    pub async fn get_locomotive(&self, id: i32) -> AppResult<LocomotiveInfo> {
        require(self.locomotives.get_locomotive_by_id(id).await?, "Locomotive", id)
    }

    #[instrument(skip(self))]
    pub async fn create_locomotive(&self, locomotive: LocomotiveCreate) -> AppResult<LocomotiveInfo> {
        self.ensure_unique_number(&locomotive.number, None).await?;
        self.ensure_references(locomotive.location_work_id, locomotive.service_type_id, locomotive.work_type_id)
            .await?;
        Ok(self.locomotives.create_locomotive(locomotive).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_locomotive(&self, id: i32, update: LocomotiveUpdate) -> AppResult<LocomotiveInfo> {
        let current = self.get_locomotive(id).await?;

        if let Some(number) = &update.number {
            self.ensure_unique_number(number, Some(id)).await?;
        }
        // 工种归属按合并后的值检查
        self.ensure_references(
            update.location_work_id.flatten(),
            update.service_type_id.unwrap_or(current.service_type_id),
            update.work_type_id.unwrap_or(current.work_type_id),
        )
        .await?;

        require(self.locomotives.update_locomotive(id, update).await?, "Locomotive", id)
    }

    /// 删除机车，仍有员工分配到该机车时拒绝删除
    #[instrument(skip(self))]
    pub async fn delete_locomotive(&self, id: i32) -> AppResult<LocomotiveInfo> {
        let locomotive = self.get_locomotive(id).await?;

        let employees = self.employees.count_employees_by_locomotive(id).await?;
        if employees > 0 {
            return Err(AppError::conflict(format!(
                "Locomotive '{}' still has {employees} employee(s) assigned",
                locomotive.number
            )));
        }

        require(self.locomotives.delete_locomotive(id).await?, "Locomotive", id)
    }

    async fn ensure_unique_number(&self, number: &str, current_id: Option<i32>) -> AppResult<()> {
        match self.locomotives.find_locomotive_by_number(number).await? {
            Some(existing) if Some(existing.id) != current_id => {
                Err(AppError::conflict(format!("Locomotive '{number}' already exists")))
            }
            _ => Ok(()),
        }
    }

    async fn ensure_references(
        &self,
        location_work_id: Option<i32>,
        service_type_id: Option<i32>,
        work_type_id: Option<i32>,
    ) -> AppResult<()> {
        if let Some(id) = location_work_id {
            require(self.locations.get_location_by_id(id).await?, "Location", id)?;
        }
        if let Some(id) = service_type_id {
            require(self.service_types.get_service_type_by_id(id).await?, "Service type", id)?;
        }
        if let Some(id) = work_type_id {
            let work_type = require(self.work_types.get_work_type_by_id(id).await?, "Work type", id)?;
            if let Some(service_type_id) = service_type_id {
                if work_type.service_type_id != service_type_id {
                    return Err(AppError::bad_request(format!(
                        "Work type '{}' does not belong to service type {service_type_id}",
                        work_type.name
                    )));
                }
            }
        }
        Ok(())
    }
}
