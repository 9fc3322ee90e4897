//! 假期仓库
//!
//! 负责员工假期的数据库操作，包括区间冲突查询、按当天日期的状态查询以及统计

use crate::models::leave::{LeaveCreate, LeaveFilter, LeaveInfo, LeaveStatistics, LeaveTypeCount, LeaveUpdate};
use crate::repositories::traits::LeaveRepositoryTrait;
use crate::DatabaseResult;
use chrono::{Days, NaiveDate};
use sqlx::PgPool;
use tracing::debug;

/// 从 `source`（表名或 CTE 名）选出假期，联表得到员工全名与假期类型名称
fn select_leaves(source: &str) -> String {
    format!(
        r#"
        SELECT lv.id, lv.employee_id,
               concat_ws(' ', emp.last_name, emp.first_name, emp.middle_name) AS employee_name,
               lv.leave_type_id, lt.name AS leave_type_name,
               lv.start_date, lv.end_date, lv.comment
        FROM {source} lv
        JOIN employees emp ON emp.id = lv.employee_id
        JOIN leave_types lt ON lt.id = lv.leave_type_id
        "#
    )
}

/// 统计查询的计数行
#[derive(Debug, sqlx::FromRow)]
struct LeaveCounters {
    total: i64,
    active: i64,
    upcoming: i64,
    employees_on_leave: i64,
}

/// 假期仓库结构体
#[derive(Debug, Clone)]
pub struct LeaveRepository {
    pool: PgPool,
}

impl LeaveRepository {
    /// 创建新的假期仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LeaveRepositoryTrait for LeaveRepository {
    /// 按过滤条件查询假期
    ///
    /// 日期窗口 `[from, to]` 使用与冲突检测相同的闭区间相交规则：
    /// `start_date <= to AND end_date >= from`
    async fn find_leaves(&self, filter: LeaveFilter) -> DatabaseResult<Vec<LeaveInfo>> {
        debug!("🔍 查询假期 {:#?}", filter);

        let sql = format!(
            r#"
            {}
            WHERE ($1::int IS NULL OR lv.employee_id = $1)
              AND ($2::int IS NULL OR lv.leave_type_id = $2)
              AND ($3::date IS NULL OR lv.end_date >= $3)
              AND ($4::date IS NULL OR lv.start_date <= $4)
            ORDER BY lv.start_date DESC, lv.id
            "#,
            select_leaves("leaves")
        );
        let leaves = sqlx::query_as::<_, LeaveInfo>(&sql)
            .bind(filter.employee_id)
            .bind(filter.leave_type_id)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_all(&self.pool)
            .await?;

        debug!("✅ 查询完成 - 共 {} 条假期", leaves.len());
        Ok(leaves)
    }

    async fn get_leave_by_id(&self, id: i32) -> DatabaseResult<Option<LeaveInfo>> {
        debug!("🔍 根据 ID 获取假期: {}", id);

        let sql = format!("{} WHERE lv.id = $1", select_leaves("leaves"));
        let leave = sqlx::query_as::<_, LeaveInfo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(leave)
    }

    /// 查询冲突的假期
    ///
    /// 两个闭区间 `[a_start, a_end]`、`[b_start, b_end]` 相交当且仅当
    /// `a_start <= b_end AND a_end >= b_start`，由 `(employee_id, start_date, end_date)` 索引支撑
    async fn find_overlapping_leaves(
        &self,
        employee_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> DatabaseResult<Vec<LeaveInfo>> {
        debug!(
            "🔍 检查假期冲突 - 员工: {}, 区间: {} ~ {}, 排除: {:?}",
            employee_id, start_date, end_date, exclude_id
        );

        let sql = format!(
            r#"
            {}
            WHERE lv.employee_id = $1
              AND lv.start_date <= $3
              AND lv.end_date >= $2
              AND ($4::int IS NULL OR lv.id <> $4)
            ORDER BY lv.start_date, lv.id
            "#,
            select_leaves("leaves")
        );
        let leaves = sqlx::query_as::<_, LeaveInfo>(&sql)
            .bind(employee_id)
            .bind(start_date)
            .bind(end_date)
            .bind(exclude_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(leaves)
    }

    async fn find_active_leaves(&self, today: NaiveDate) -> DatabaseResult<Vec<LeaveInfo>> {
        let sql = format!(
            "{} WHERE lv.start_date <= $1 AND lv.end_date >= $1 ORDER BY lv.end_date, lv.id",
            select_leaves("leaves")
        );
        let leaves = sqlx::query_as::<_, LeaveInfo>(&sql)
            .bind(today)
            .fetch_all(&self.pool)
            .await?;

        Ok(leaves)
    }

    async fn find_upcoming_leaves(&self, today: NaiveDate) -> DatabaseResult<Vec<LeaveInfo>> {
        let sql = format!(
            "{} WHERE lv.start_date > $1 ORDER BY lv.start_date, lv.id",
            select_leaves("leaves")
        );
        let leaves = sqlx::query_as::<_, LeaveInfo>(&sql)
            .bind(today)
            .fetch_all(&self.pool)
            .await?;

        Ok(leaves)
    }

    async fn find_leaves_for_day(&self, today: NaiveDate) -> DatabaseResult<Vec<LeaveInfo>> {
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
        let sql = format!(
            r#"
            {}
            WHERE (lv.start_date <= $1 AND lv.end_date >= $1)
               OR (lv.start_date >= $1 AND lv.start_date < $2)
               OR (lv.end_date >= $1 AND lv.end_date < $2)
            ORDER BY lv.start_date, lv.id
            "#,
            select_leaves("leaves")
        );
        let leaves = sqlx::query_as::<_, LeaveInfo>(&sql)
            .bind(today)
            .bind(tomorrow)
            .fetch_all(&self.pool)
            .await?;

        Ok(leaves)
    }

    /// 假期统计
    ///
    /// 使用 `FILTER` 子句在一次扫描中得到各状态数量，按类型的数量单独分组查询，
    /// 没有假期的类型也会以 0 出现在结果中
    async fn leave_statistics(&self, today: NaiveDate) -> DatabaseResult<LeaveStatistics> {
        debug!("📊 统计假期 - 基准日期: {}", today);

        let counters = sqlx::query_as::<_, LeaveCounters>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE start_date <= $1 AND end_date >= $1) AS active,
                   COUNT(*) FILTER (WHERE start_date > $1) AS upcoming,
                   COUNT(DISTINCT employee_id) FILTER (WHERE start_date <= $1 AND end_date >= $1) AS employees_on_leave
            FROM leaves
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        let by_type = sqlx::query_as::<_, LeaveTypeCount>(
            r#"
            SELECT lt.id AS leave_type_id, lt.name AS leave_type_name, COUNT(lv.id) AS count
            FROM leave_types lt
            LEFT JOIN leaves lv ON lv.leave_type_id = lt.id
            GROUP BY lt.id, lt.name
            ORDER BY lt.name, lt.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(LeaveStatistics {
            total: counters.total,
            active: counters.active,
            upcoming: counters.upcoming,
            past: counters.total - counters.active - counters.upcoming,
            employees_on_leave: counters.employees_on_leave,
            by_type,
        })
    }

    async fn count_leaves_by_type(&self, leave_type_id: i32) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leaves WHERE leave_type_id = $1")
            .bind(leave_type_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn create_leave(&self, leave: LeaveCreate) -> DatabaseResult<LeaveInfo> {
        debug!("📝 创建假期: {:#?}", leave);

        let sql = format!(
            r#"
            WITH changed AS (
                INSERT INTO leaves (employee_id, leave_type_id, start_date, end_date, comment, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, now(), now())
                RETURNING *
            )
            {}
            "#,
            select_leaves("changed")
        );
        let leave = sqlx::query_as::<_, LeaveInfo>(&sql)
            .bind(leave.employee_id)
            .bind(leave.leave_type_id)
            .bind(leave.start_date)
            .bind(leave.end_date)
            .bind(leave.comment)
            .fetch_one(&self.pool)
            .await?;

        debug!("✅ 假期创建成功: {:#?}", leave);
        Ok(leave)
    }

    async fn update_leave(&self, id: i32, update: LeaveUpdate) -> DatabaseResult<Option<LeaveInfo>> {
        debug!("🔄 更新假期 {} 信息: {:#?}", id, update);

        let sql = format!(
            r#"
            WITH changed AS (
                UPDATE leaves
                SET employee_id = coalesce($2, employee_id),
                    leave_type_id = coalesce($3, leave_type_id),
                    start_date = coalesce($4, start_date),
                    end_date = coalesce($5, end_date),
                    comment = coalesce($6, comment),
                    updated_at = now()
                WHERE id = $1
                RETURNING *
            )
            {}
            "#,
            select_leaves("changed")
        );
        let leave = sqlx::query_as::<_, LeaveInfo>(&sql)
            .bind(id)
            .bind(update.employee_id)
            .bind(update.leave_type_id)
            .bind(update.start_date)
            .bind(update.end_date)
            .bind(update.comment)
            .fetch_optional(&self.pool)
            .await?;

        Ok(leave)
    }

    async fn delete_leave(&self, id: i32) -> DatabaseResult<Option<LeaveInfo>> {
        debug!("🗑️ 删除假期: {}", id);

        let sql = format!(
            r#"
            WITH changed AS (
                DELETE FROM leaves
                WHERE id = $1
                RETURNING *
            )
            {}
            "#,
            select_leaves("changed")
        );
        let leave = sqlx::query_as::<_, LeaveInfo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(leave)
    }
}
