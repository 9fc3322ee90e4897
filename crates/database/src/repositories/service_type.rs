//! 服务类型仓库

use crate::models::service_type::{ServiceTypeCreate, ServiceTypeInfo, ServiceTypeUpdate};
use crate::repositories::traits::ServiceTypeRepositoryTrait;
use crate::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ServiceTypeRepository {
    pool: PgPool,
}

impl ServiceTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ServiceTypeRepositoryTrait for ServiceTypeRepository {
    async fn find_service_types(&self) -> DatabaseResult<Vec<ServiceTypeInfo>> {
        debug!("🔍 查询全部服务类型");

        let service_types = sqlx::query_as::<_, ServiceTypeInfo>(
            r#"
            SELECT id, name, description
            FROM service_types
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(service_types)
    }

    async fn get_service_type_by_id(&self, id: i32) -> DatabaseResult<Option<ServiceTypeInfo>> {
        let service_type = sqlx::query_as::<_, ServiceTypeInfo>(
            r#"
            SELECT id, name, description
            FROM service_types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service_type)
    }

    async fn find_service_type_by_name(&self, name: &str) -> DatabaseResult<Option<ServiceTypeInfo>> {
        let service_type = sqlx::query_as::<_, ServiceTypeInfo>(
            r#"
            SELECT id, name, description
            FROM service_types
            WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service_type)
    }

    async fn create_service_type(&self, service_type: ServiceTypeCreate) -> DatabaseResult<ServiceTypeInfo> {
        debug!("📝 创建服务类型: {:#?}", service_type);

        let service_type = sqlx::query_as::<_, ServiceTypeInfo>(
            r#"
            INSERT INTO service_types (name, description, created_at, updated_at)
            VALUES ($1, $2, now(), now())
            RETURNING id, name, description
            "#,
        )
        .bind(service_type.name)
        .bind(service_type.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(service_type)
    }

    async fn update_service_type(&self, id: i32, update: ServiceTypeUpdate) -> DatabaseResult<Option<ServiceTypeInfo>> {
        debug!("🔄 更新服务类型 {} 信息: {:#?}", id, update);

        let service_type = sqlx::query_as::<_, ServiceTypeInfo>(
            r#"
            UPDATE service_types
            SET name = coalesce($2, name),
                description = coalesce($3, description),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service_type)
    }

    async fn delete_service_type(&self, id: i32) -> DatabaseResult<Option<ServiceTypeInfo>> {
        debug!("🗑️ 删除服务类型: {}", id);

        let service_type = sqlx::query_as::<_, ServiceTypeInfo>(
            r#"
            DELETE FROM service_types
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service_type)
    }
}
