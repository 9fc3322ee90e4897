//! 班组服务
//!
//! 提供班组相关的业务逻辑操作：名称唯一性校验，以及删除前的员工依赖检查

use crate::models::err::{AppError, AppResult};
use crate::services::require;
use database::{
    BrigadaCreate, BrigadaInfo, BrigadaRepositoryTrait, BrigadaUpdate, EmployeeInfo, EmployeeRepositoryTrait,
    Repositories,
};
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct BrigadaService {
    brigades: Arc<dyn BrigadaRepositoryTrait>,
    employees: Arc<dyn EmployeeRepositoryTrait>,
}

impl BrigadaService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            brigades: repositories.brigades.clone(),
            employees: repositories.employees.clone(),
        }
    }

    pub async fn find_brigades(&self) -> AppResult<Vec<BrigadaInfo>> {
        Ok(self.brigades.find_brigades().await?)
    }

    pub async fn get_brigada(&self, id: i32) -> AppResult<BrigadaInfo> {
        require(self.brigades.get_brigada_by_id(id).await?, "Brigada", id)
    }

    /// 班组成员列表，班组不存在时返回 404
    pub async fn find_brigada_employees(&self, id: i32) -> AppResult<Vec<EmployeeInfo>> {
        self.get_brigada(id).await?;
        Ok(self.employees.find_employees_by_brigada(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn create_brigada(&self, brigada: BrigadaCreate) -> AppResult<BrigadaInfo> {
        self.ensure_unique_name(&brigada.name, None).await?;
        Ok(self.brigades.create_brigada(brigada).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_brigada(&self, id: i32, update: BrigadaUpdate) -> AppResult<BrigadaInfo> {
        self.get_brigada(id).await?;
        if let Some(name) = &update.name {
            self.ensure_unique_name(name, Some(id)).await?;
        }
        require(self.brigades.update_brigada(id, update).await?, "Brigada", id)
    }

    /// 删除班组
    ///
    /// 班组下仍有员工时拒绝删除
    #[instrument(skip(self))]
    pub async fn delete_brigada(&self, id: i32) -> AppResult<BrigadaInfo> {
        let brigada = self.get_brigada(id).await?;

        let employees = self.employees.count_employees_by_brigada(id).await?;
        if employees > 0 {
            return Err(AppError::conflict(format!(
                "Brigada '{}' still has {employees} employee(s) assigned",
                brigada.name
            )));
        }

        require(self.brigades.delete_brigada(id).await?, "Brigada", id)
    }

    async fn ensure_unique_name(&self, name: &str, current_id: Option<i32>) -> AppResult<()> {
        match self.brigades.find_brigada_by_name(name).await? {
            Some(existing) if Some(existing.id) != current_id => {
                Err(AppError::conflict(format!("Brigada '{name}' already exists")))
            }
            _ => Ok(()),
        }
    }
}
