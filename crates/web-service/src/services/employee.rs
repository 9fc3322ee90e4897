//! 员工服务
//!
//! 提供员工相关的业务逻辑操作：工号唯一性、外键校验、搜索以及照片管理。
//! 与机车一致，同时给出服务类型和工种时，工种必须属于该服务类型

use crate::models::err::{AppError, AppResult};
use crate::services::photo::PhotoStorage;
use crate::services::require;
use database::{
    BrigadaRepositoryTrait, EmployeeCreate, EmployeeInfo, EmployeeRepositoryTrait, EmployeeSearch,
    EmployeeSearchResult, EmployeeUpdate, LocomotiveRepositoryTrait, Repositories, ServiceTypeRepositoryTrait,
    WorkTypeRepositoryTrait,
};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepositoryTrait>,
    brigades: Arc<dyn BrigadaRepositoryTrait>,
    locomotives: Arc<dyn LocomotiveRepositoryTrait>,
    service_types: Arc<dyn ServiceTypeRepositoryTrait>,
    work_types: Arc<dyn WorkTypeRepositoryTrait>,
    photos: PhotoStorage,
}

/// 员工引用的外键
struct EmployeeReferences {
    service_type_id: Option<i32>,
    work_type_id: Option<i32>,
    brigada_id: Option<i32>,
    locomotive_id: Option<i32>,
}

impl EmployeeService {
    pub fn new(repositories: &Repositories, photos: PhotoStorage) -> Self {
        Self {
            employees: repositories.employees.clone(),
            brigades: repositories.brigades.clone(),
            locomotives: repositories.locomotives.clone(),
            service_types: repositories.service_types.clone(),
            work_types: repositories.work_types.clone(),
            photos,
        }
    }

    pub fn photos(&self) -> &PhotoStorage {
        &self.photos
    }

    pub async fn find_employees(&self) -> AppResult<Vec<EmployeeInfo>> {
        Ok(self.employees.find_employees().await?)
    }

    #[instrument(skip(self))]
    pub async fn search_employees(&self, search: EmployeeSearch) -> AppResult<EmployeeSearchResult> {
        Ok(self.employees.search_employees(search).await?)
    }

    pub async fn get_employee(&self, id: i32) -> AppResult<EmployeeInfo> {
        require(self.employees.get_employee_by_id(id).await?, "Employee", id)
    }

    #[instrument(skip(self))]
    pub async fn create_employee(&self, employee: EmployeeCreate) -> AppResult<EmployeeInfo> {
        self.ensure_unique_personnel_number(&employee.personnel_number, None).await?;
        self.ensure_references(EmployeeReferences {
            service_type_id: employee.service_type_id,
            work_type_id: employee.work_type_id,
            brigada_id: employee.brigada_id,
            locomotive_id: employee.locomotive_id,
        })
        .await?;

        let employee = self.employees.create_employee(employee).await?;
        info!("👤 新员工: {} ({})", employee.full_name(), employee.personnel_number);
        Ok(employee)
    }

    /// 更新员工
    ///
    /// 关联字段为 `Some(None)` 时解除关联；工种归属按合并后的值检查
    #[instrument(skip(self))]
    pub async fn update_employee(&self, id: i32, update: EmployeeUpdate) -> AppResult<EmployeeInfo> {
        let current = self.get_employee(id).await?;

        if let Some(personnel_number) = &update.personnel_number {
            self.ensure_unique_personnel_number(personnel_number, Some(id)).await?;
        }
        self.ensure_references(EmployeeReferences {
            service_type_id: update.service_type_id.unwrap_or(current.service_type_id),
            work_type_id: update.work_type_id.unwrap_or(current.work_type_id),
            brigada_id: update.brigada_id.flatten(),
            locomotive_id: update.locomotive_id.flatten(),
        })
        .await?;

        require(self.employees.update_employee(id, update).await?, "Employee", id)
    }

    /// 上传员工照片
    ///
    /// 新照片保存成功并写入数据库后，才删除旧照片文件
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_photo(&self, id: i32, content_type: Option<&str>, bytes: &[u8]) -> AppResult<EmployeeInfo> {
        let current = self.get_employee(id).await?;

        let path = self.photos.save(content_type, bytes).await?;
        let updated = match self.employees.update_employee_photo(id, &path).await {
            Ok(Some(employee)) => employee,
            Ok(None) => {
                self.photos.remove(&path).await;
                return Err(AppError::not_found("Employee", id));
            }
            Err(e) => {
                self.photos.remove(&path).await;
                return Err(e.into());
            }
        };

        if let Some(old) = current.photo.as_deref().filter(|old| *old != path) {
            self.photos.remove(old).await;
        }
        Ok(updated)
    }

    /// 删除员工，其假期随之级联删除，照片文件一并清理
    #[instrument(skip(self))]
    pub async fn delete_employee(&self, id: i32) -> AppResult<EmployeeInfo> {
        let employee = require(self.employees.delete_employee(id).await?, "Employee", id)?;
        if let Some(photo) = employee.photo.as_deref() {
            self.photos.remove(photo).await;
        }
        Ok(employee)
    }

    async fn ensure_unique_personnel_number(&self, personnel_number: &str, current_id: Option<i32>) -> AppResult<()> {
        match self.employees.find_employee_by_personnel_number(personnel_number).await? {
            Some(existing) if Some(existing.id) != current_id => Err(AppError::conflict(format!(
                "Personnel number '{personnel_number}' is already used by {}",
                existing.full_name()
            ))),
            _ => Ok(()),
        }
    }

    async fn ensure_references(&self, refs: EmployeeReferences) -> AppResult<()> {
        if let Some(id) = refs.service_type_id {
            require(self.service_types.get_service_type_by_id(id).await?, "Service type", id)?;
        }
        if let Some(id) = refs.work_type_id {
            let work_type = require(self.work_types.get_work_type_by_id(id).await?, "Work type", id)?;
            if let Some(service_type_id) = refs.service_type_id {
                if work_type.service_type_id != service_type_id {
                    return Err(AppError::bad_request(format!(
                        "Work type '{}' does not belong to service type {service_type_id}",
                        work_type.name
                    )));
                }
            }
        }
        if let Some(id) = refs.brigada_id {
            require(self.brigades.get_brigada_by_id(id).await?, "Brigada", id)?;
        }
        if let Some(id) = refs.locomotive_id {
            require(self.locomotives.get_locomotive_by_id(id).await?, "Locomotive", id)?;
        }
        Ok(())
    }
}
