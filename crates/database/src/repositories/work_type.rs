//! 工种仓库
//!
//! 查询结果联表带出服务类型名称。写操作通过 `WITH changed AS (... RETURNING *)`
//! 在同一条语句中完成写入并联表返回。

use crate::models::work_type::{WorkTypeCreate, WorkTypeInfo, WorkTypeUpdate};
use crate::repositories::traits::WorkTypeRepositoryTrait;
use crate::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

/// 从 `source` 选出工种并联表服务类型，`source` 为表名或 CTE 名
fn select_work_types(source: &str) -> String {
    format!(
        r#"
        SELECT w.id, w.name, w.description, w.service_type_id, st.name AS service_type_name
        FROM {source} w
        JOIN service_types st ON st.id = w.service_type_id
        "#
    )
}

#[derive(Debug, Clone)]
pub struct WorkTypeRepository {
    pool: PgPool,
}

impl WorkTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl WorkTypeRepositoryTrait for WorkTypeRepository {
    async fn find_work_types(&self, service_type_id: Option<i32>) -> DatabaseResult<Vec<WorkTypeInfo>> {
        debug!("🔍 查询工种 - 服务类型: {:?}", service_type_id);

        let sql = format!(
            "{} WHERE ($1::int IS NULL OR w.service_type_id = $1) ORDER BY st.name, w.name, w.id",
            select_work_types("work_types")
        );
        let work_types = sqlx::query_as::<_, WorkTypeInfo>(&sql)
            .bind(service_type_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(work_types)
    }

    async fn get_work_type_by_id(&self, id: i32) -> DatabaseResult<Option<WorkTypeInfo>> {
        let sql = format!("{} WHERE w.id = $1", select_work_types("work_types"));
        let work_type = sqlx::query_as::<_, WorkTypeInfo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(work_type)
    }

    async fn find_work_type_by_name(&self, service_type_id: i32, name: &str) -> DatabaseResult<Option<WorkTypeInfo>> {
        let sql = format!(
            "{} WHERE w.service_type_id = $1 AND w.name = $2 LIMIT 1",
            select_work_types("work_types")
        );
        let work_type = sqlx::query_as::<_, WorkTypeInfo>(&sql)
            .bind(service_type_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(work_type)
    }

    async fn count_work_type_references(&self, id: i32) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT (SELECT COUNT(*) FROM employees WHERE work_type_id = $1)
                 + (SELECT COUNT(*) FROM locomotives WHERE work_type_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn create_work_type(&self, work_type: WorkTypeCreate) -> DatabaseResult<WorkTypeInfo> {
        debug!("📝 创建工种: {:#?}", work_type);

        let sql = format!(
            r#"
            WITH changed AS (
                INSERT INTO work_types (name, description, service_type_id, created_at, updated_at)
                VALUES ($1, $2, $3, now(), now())
                RETURNING *
            )
            {}
            "#,
            select_work_types("changed")
        );
        let work_type = sqlx::query_as::<_, WorkTypeInfo>(&sql)
            .bind(work_type.name)
            .bind(work_type.description)
            .bind(work_type.service_type_id)
            .fetch_one(&self.pool)
            .await?;

        debug!("✅ 工种创建成功: {:#?}", work_type);
        Ok(work_type)
    }

    async fn update_work_type(&self, id: i32, update: WorkTypeUpdate) -> DatabaseResult<Option<WorkTypeInfo>> {
        debug!("🔄 更新工种 {} 信息: {:#?}", id, update);

        let sql = format!(
            r#"
            WITH changed AS (
                UPDATE work_types
                SET name = coalesce($2, name),
                    description = coalesce($3, description),
                    service_type_id = coalesce($4, service_type_id),
                    updated_at = now()
                WHERE id = $1
                RETURNING *
            )
            {}
            "#,
            select_work_types("changed")
        );
        let work_type = sqlx::query_as::<_, WorkTypeInfo>(&sql)
            .bind(id)
            .bind(update.name)
            .bind(update.description)
            .bind(update.service_type_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(work_type)
    }

    async fn delete_work_type(&self, id: i32) -> DatabaseResult<Option<WorkTypeInfo>> {
        debug!("🗑️ 删除工种: {}", id);

        let sql = format!(
            r#"
            WITH changed AS (
                DELETE FROM work_types
                WHERE id = $1
                RETURNING *
            )
            {}
            "#,
            select_work_types("changed")
        );
        let work_type = sqlx::query_as::<_, WorkTypeInfo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(work_type)
    }
}
