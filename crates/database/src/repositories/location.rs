//! 作业地点仓库

use crate::models::location::{LocationCreate, LocationInfo, LocationUpdate};
use crate::repositories::traits::LocationRepositoryTrait;
use crate::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LocationRepositoryTrait for LocationRepository {
    async fn find_locations(&self) -> DatabaseResult<Vec<LocationInfo>> {
        debug!("🔍 查询全部作业地点");

        let locations = sqlx::query_as::<_, LocationInfo>(
            r#"
            SELECT id, name, address, description
            FROM location_works
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    async fn get_location_by_id(&self, id: i32) -> DatabaseResult<Option<LocationInfo>> {
        let location = sqlx::query_as::<_, LocationInfo>(
            r#"
            SELECT id, name, address, description
            FROM location_works
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    async fn find_location_by_name(&self, name: &str) -> DatabaseResult<Option<LocationInfo>> {
        let location = sqlx::query_as::<_, LocationInfo>(
            r#"
            SELECT id, name, address, description
            FROM location_works
            WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    async fn create_location(&self, location: LocationCreate) -> DatabaseResult<LocationInfo> {
        debug!("📝 创建作业地点: {:#?}", location);

        let location = sqlx::query_as::<_, LocationInfo>(
            r#"
            INSERT INTO location_works (name, address, description, created_at, updated_at)
            VALUES ($1, $2, $3, now(), now())
            RETURNING id, name, address, description
            "#,
        )
        .bind(location.name)
        .bind(location.address)
        .bind(location.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    async fn update_location(&self, id: i32, update: LocationUpdate) -> DatabaseResult<Option<LocationInfo>> {
        debug!("🔄 更新作业地点 {} 信息: {:#?}", id, update);

        let location = sqlx::query_as::<_, LocationInfo>(
            r#"
            UPDATE location_works
            SET name = coalesce($2, name),
                address = coalesce($3, address),
                description = coalesce($4, description),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, address, description
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.address)
        .bind(update.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    async fn delete_location(&self, id: i32) -> DatabaseResult<Option<LocationInfo>> {
        debug!("🗑️ 删除作业地点: {}", id);

        let location = sqlx::query_as::<_, LocationInfo>(
            r#"
            DELETE FROM location_works
            WHERE id = $1
            RETURNING id, name, address, description
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }
}
