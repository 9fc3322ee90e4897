//! 假期类型仓库

use crate::models::leave_type::{LeaveTypeCreate, LeaveTypeInfo, LeaveTypeUpdate};
use crate::repositories::traits::LeaveTypeRepositoryTrait;
use crate::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LeaveTypeRepository {
    pool: PgPool,
}

impl LeaveTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LeaveTypeRepositoryTrait for LeaveTypeRepository {
    async fn find_leave_types(&self) -> DatabaseResult<Vec<LeaveTypeInfo>> {
        debug!("🔍 查询全部假期类型");

        let leave_types = sqlx::query_as::<_, LeaveTypeInfo>(
            r#"
            SELECT id, name, description
            FROM leave_types
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(leave_types)
    }

    async fn get_leave_type_by_id(&self, id: i32) -> DatabaseResult<Option<LeaveTypeInfo>> {
        let leave_type = sqlx::query_as::<_, LeaveTypeInfo>(
            r#"
            SELECT id, name, description
            FROM leave_types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(leave_type)
    }

    async fn find_leave_type_by_name(&self, name: &str) -> DatabaseResult<Option<LeaveTypeInfo>> {
        let leave_type = sqlx::query_as::<_, LeaveTypeInfo>(
            r#"
            SELECT id, name, description
            FROM leave_types
            WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(leave_type)
    }

    async fn create_leave_type(&self, leave_type: LeaveTypeCreate) -> DatabaseResult<LeaveTypeInfo> {
        debug!("📝 创建假期类型: {:#?}", leave_type);

        let leave_type = sqlx::query_as::<_, LeaveTypeInfo>(
            r#"
            INSERT INTO leave_types (name, description, created_at, updated_at)
            VALUES ($1, $2, now(), now())
            RETURNING id, name, description
            "#,
        )
        .bind(leave_type.name)
        .bind(leave_type.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(leave_type)
    }

    async fn update_leave_type(&self, id: i32, update: LeaveTypeUpdate) -> DatabaseResult<Option<LeaveTypeInfo>> {
        debug!("🔄 更新假期类型 {} 信息: {:#?}", id, update);

        let leave_type = sqlx::query_as::<_, LeaveTypeInfo>(
            r#"
            UPDATE leave_types
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

        Ok(leave_type)
    }

    async fn delete_leave_type(&self, id: i32) -> DatabaseResult<Option<LeaveTypeInfo>> {
        debug!("🗑️ 删除假期类型: {}", id);

        let leave_type = sqlx::query_as::<_, LeaveTypeInfo>(
            r#"
            DELETE FROM leave_types
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(leave_type)
    }
}
