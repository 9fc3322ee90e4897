//! 作业地点服务

use crate::models::err::{AppError, AppResult};
use crate::services::require;
use database::{
    LocationCreate, LocationInfo, LocationRepositoryTrait, LocationUpdate, LocomotiveRepositoryTrait, Repositories,
};
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct LocationService {
    locations: Arc<dyn LocationRepositoryTrait>,
    locomotives: Arc<dyn LocomotiveRepositoryTrait>,
}

impl LocationService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            locations: repositories.locations.clone(),
            locomotives: repositories.locomotives.clone(),
        }
    }

    pub async fn find_locations(&self) -> AppResult<Vec<LocationInfo>> {
        Ok(self.locations.find_locations().await?)
    }

    pub async fn get_location(&self, id: i32) -> AppResult<LocationInfo> {
        require(self.locations.get_location_by_id(id).await?, "Location", id)
    }

    #[instrument(skip(self))]
    pub async fn create_location(&self, location: LocationCreate) -> AppResult<LocationInfo> {
        self.ensure_unique_name(&location.name, None).await?;
        Ok(self.locations.create_location(location).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_location(&self, id: i32, update: LocationUpdate) -> AppResult<LocationInfo> {
        self.get_location(id).await?;
        if let Some(name) = &update.name {
            self.ensure_unique_name(name, Some(id)).await?;
        }
        require(self.locations.update_location(id, update).await?, "Location", id)
    }

    /// 删除作业地点，仍有机车归属时拒绝删除
    #[instrument(skip(self))]
    pub async fn delete_location(&self, id: i32) -> AppResult<LocationInfo> {
        let location = self.get_location(id).await?;

        let locomotives = self.locomotives.count_locomotives_by_location(id).await?;
        if locomotives > 0 {
            return Err(AppError::conflict(format!(
                "Location '{}' still has {locomotives} locomotive(s) assigned",
                location.name
            )));
        }

        require(self.locations.delete_location(id).await?, "Location", id)
    }

    async fn ensure_unique_name(&self, name: &str, current_id: Option<i32>) -> AppResult<()> {
        match self.locations.find_location_by_name(name).await? {
            Some(existing) if Some(existing.id) != current_id => {
                Err(AppError::conflict(format!("Location '{name}' already exists")))
            }
            _ => Ok(()),
        }
    }
}
