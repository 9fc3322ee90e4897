//! 班组仓库
//!
//! 负责班组相关的数据库操作

use crate::models::brigada::{BrigadaCreate, BrigadaInfo, BrigadaUpdate};
use crate::repositories::traits::BrigadaRepositoryTrait;
use crate::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

/// 班组仓库结构体
#[derive(Debug, Clone)]
pub struct BrigadaRepository {
    pool: PgPool,
}

impl BrigadaRepository {
    /// 创建新的班组仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl BrigadaRepositoryTrait for BrigadaRepository {
    async fn find_brigades(&self) -> DatabaseResult<Vec<BrigadaInfo>> {
        debug!("🔍 查询全部班组");

        let brigades = sqlx::query_as::<_, BrigadaInfo>(
            r#"
            SELECT id, name, description
            FROM brigades
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("✅ 查询完成 - 共 {} 个班组", brigades.len());
        Ok(brigades)
    }

    async fn get_brigada_by_id(&self, id: i32) -> DatabaseResult<Option<BrigadaInfo>> {
        debug!("🔍 根据 ID 获取班组: {}", id);

        let brigada = sqlx::query_as::<_, BrigadaInfo>(
            r#"
            SELECT id, name, description
            FROM brigades
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(brigada)
    }

    async fn find_brigada_by_name(&self, name: &str) -> DatabaseResult<Option<BrigadaInfo>> {
        let brigada = sqlx::query_as::<_, BrigadaInfo>(
            r#"
            SELECT id, name, description
            FROM brigades
            WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(brigada)
    }

    /// 创建新班组
    ///
    /// # 参数
    /// - `brigada`: 班组创建信息
    ///
    /// # 返回值
    /// 返回创建的班组信息
    async fn create_brigada(&self, brigada: BrigadaCreate) -> DatabaseResult<BrigadaInfo> {
        debug!("📝 创建班组: {:#?}", brigada);

        let brigada = sqlx::query_as::<_, BrigadaInfo>(
            r#"
            INSERT INTO brigades (name, description, created_at, updated_at)
            VALUES ($1, $2, now(), now())
            RETURNING id, name, description
            "#,
        )
        .bind(brigada.name)
        .bind(brigada.description)
        .fetch_one(&self.pool)
        .await?;

        debug!("✅ 班组创建成功: {:#?}", brigada);
        Ok(brigada)
    }

    /// 更新班组信息
    ///
    /// ## SQL
    ///
    /// 更新数据中的字段都是[`Option`]，使用 `coalesce` 函数处理：用户输入 `None` 时
    /// 会被转换为数据库的 null，最终保留之前的值。
    async fn update_brigada(&self, id: i32, update: BrigadaUpdate) -> DatabaseResult<Option<BrigadaInfo>> {
        debug!("🔄 更新班组 {} 信息: {:#?}", id, update);

        let brigada = sqlx::query_as::<_, BrigadaInfo>(
            r#"
            UPDATE brigades
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

        Ok(brigada)
    }

    async fn delete_brigada(&self, id: i32) -> DatabaseResult<Option<BrigadaInfo>> {
        debug!("🗑️ 删除班组: {}", id);

        let brigada = sqlx::query_as::<_, BrigadaInfo>(
            r#"
            DELETE FROM brigades
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(brigada)
    }
}
