//! 机车仓库
//!
//! 负责机车相关的数据库操作，查询结果联表带出作业地点、服务类型和工种名称

use crate::models::locomotive::{LocomotiveCreate, LocomotiveInfo, LocomotiveUpdate};
use crate::repositories::traits::LocomotiveRepositoryTrait;
use crate::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

/// 从 `source`（表名或 CTE 名）选出机车并联表得到显示名称
fn select_locomotives(source: &str) -> String {
    format!(
        r#"
        SELECT l.id, l.number, l.series,
               l.location_work_id, lw.name AS location_work_name,
               l.service_type_id, st.name AS service_type_name,
               l.work_type_id, wt.name AS work_type_name
        FROM {source} l
        LEFT JOIN location_works lw ON lw.id = l.location_work_id
        LEFT JOIN service_types st ON st.id = l.service_type_id
        LEFT JOIN work_types wt ON wt.id = l.work_type_id
        "#
    )
}

/// 机车仓库结构体
#[derive(Debug, Clone)]
pub struct LocomotiveRepository {
    pool: PgPool,
}

impl LocomotiveRepository {
    /// 创建新的机车仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LocomotiveRepositoryTrait for LocomotiveRepository {
    async fn find_locomotives(&self) -> DatabaseResult<Vec<LocomotiveInfo>> {
        debug!("🔍 查询全部机车");

        let sql = format!("{} ORDER BY l.number, l.id", select_locomotives("locomotives"));
        let locomotives = sqlx::query_as::<_, LocomotiveInfo>(&sql).fetch_all(&self.pool).await?;

        debug!("✅ 查询完成 - 共 {} 台机车", locomotives.len());
        Ok(locomotives)
    }

    async fn get_locomotive_by_id(&self, id: i32) -> DatabaseResult<Option<LocomotiveInfo>> {
        debug!("🔍 根据 ID 获取机车: {}", id);

        let sql = format!("{} WHERE l.id = $1", select_locomotives("locomotives"));
        let locomotive = sqlx::query_as::<_, LocomotiveInfo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(locomotive)
    }

    async fn find_locomotive_by_number(&self, number: &str) -> DatabaseResult<Option<LocomotiveInfo>> {
        let sql = format!("{} WHERE l.number = $1 LIMIT 1", select_locomotives("locomotives"));
        let locomotive = sqlx::query_as::<_, LocomotiveInfo>(&sql)
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(locomotive)
    }

    async fn count_locomotives_by_location(&self, location_work_id: i32) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locomotives WHERE location_work_id = $1")
            .bind(location_work_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// 创建新机车
    ///
    /// 外键是否存在由服务层提前校验，数据库外键约束兜底
    async fn create_locomotive(&self, locomotive: LocomotiveCreate) -> DatabaseResult<LocomotiveInfo> {
        debug!("📝 创建机车: {:#?}", locomotive);

        let sql = format!(
            r#"
            WITH changed AS (
                INSERT INTO locomotives (number, series, location_work_id, service_type_id, work_type_id,
                                         created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, now(), now())
                RETURNING *
            )
            {}
            "#,
            select_locomotives("changed")
        );
        let locomotive = sqlx::query_as::<_, LocomotiveInfo>(&sql)
            .bind(locomotive.number)
            .bind(locomotive.series)
            .bind(locomotive.location_work_id)
            .bind(locomotive.service_type_id)
            .bind(locomotive.work_type_id)
            .fetch_one(&self.pool)
            .await?;

        debug!("✅ 机车创建成功: {:#?}", locomotive);
        Ok(locomotive)
    }

    async fn update_locomotive(&self, id: i32, update: LocomotiveUpdate) -> DatabaseResult<Option<LocomotiveInfo>> {
        debug!("🔄 更新机车 {} 信息: {:#?}", id, update);

        let sql = format!(
            r#"
            WITH changed AS (
                UPDATE locomotives
                SET number = coalesce($2, number),
                    series = coalesce($3, series),
                    location_work_id = CASE WHEN $4 THEN $5 ELSE location_work_id END,
                    service_type_id = CASE WHEN $6 THEN $7 ELSE service_type_id END,
                    work_type_id = CASE WHEN $8 THEN $9 ELSE work_type_id END,
                    updated_at = now()
                WHERE id = $1
                RETURNING *
            )
            {}
            "#,
            select_locomotives("changed")
        );
        let locomotive = sqlx::query_as::<_, LocomotiveInfo>(&sql)
            .bind(id)
            .bind(update.number)
            .bind(update.series)
            .bind(update.location_work_id.is_some())
            .bind(update.location_work_id.flatten())
            .bind(update.service_type_id.is_some())
            .bind(update.service_type_id.flatten())
            .bind(update.work_type_id.is_some())
            .bind(update.work_type_id.flatten())
            .fetch_optional(&self.pool)
            .await?;

        Ok(locomotive)
    }

    async fn delete_locomotive(&self, id: i32) -> DatabaseResult<Option<LocomotiveInfo>> {
        debug!("🗑️ 删除机车: {}", id);

        let sql = format!(
            r#"
            WITH changed AS (
                DELETE FROM locomotives
                WHERE id = $1
                RETURNING *
            )
            {}
            "#,
            select_locomotives("changed")
        );
        let locomotive = sqlx::query_as::<_, LocomotiveInfo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(locomotive)
    }
}
