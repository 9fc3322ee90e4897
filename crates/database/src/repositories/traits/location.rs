//! 作业地点仓库 trait 定义

use crate::models::location::{LocationCreate, LocationInfo, LocationUpdate};
use crate::DatabaseResult;

/// 作业地点仓库trait定义
#[async_trait::async_trait]
pub trait LocationRepositoryTrait: Send + Sync + 'static {
    async fn find_locations(&self) -> DatabaseResult<Vec<LocationInfo>>;

    async fn get_location_by_id(&self, id: i32) -> DatabaseResult<Option<LocationInfo>>;

    async fn find_location_by_name(&self, name: &str) -> DatabaseResult<Option<LocationInfo>>;

    async fn create_location(&self, location: LocationCreate) -> DatabaseResult<LocationInfo>;

    async fn update_location(&self, id: i32, update: LocationUpdate) -> DatabaseResult<Option<LocationInfo>>;

    async fn delete_location(&self, id: i32) -> DatabaseResult<Option<LocationInfo>>;
}
