//! 员工仓库
//!
//! 负责员工相关的数据库操作

use crate::models::employee::{EmployeeCreate, EmployeeInfo, EmployeeSearch, EmployeeSearchResult, EmployeeUpdate};
use crate::repositories::traits::EmployeeRepositoryTrait;
use crate::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

/// 员工查询的公共列
///
/// 所有员工查询都返回相同的列，外键对应的显示名称通过左联表得到
const EMPLOYEE_COLUMNS: &str = r#"
    e.id, e.personnel_number, e.last_name, e.first_name, e.middle_name, e.position, e.phone,
    e.birth_date, e.hire_date, e.photo,
    e.service_type_id, st.name AS service_type_name,
    e.work_type_id, wt.name AS work_type_name,
    e.brigada_id, b.name AS brigada_name,
    e.locomotive_id, l.number AS locomotive_number
"#;

/// 从 `source`（表名或 CTE 名）选出员工
fn select_employees(source: &str) -> String {
    format!(
        r#"
        SELECT {EMPLOYEE_COLUMNS}
        FROM {source} e
        LEFT JOIN service_types st ON st.id = e.service_type_id
        LEFT JOIN work_types wt ON wt.id = e.work_type_id
        LEFT JOIN brigades b ON b.id = e.brigada_id
        LEFT JOIN locomotives l ON l.id = e.locomotive_id
        "#
    )
}

/// 转义 `ILIKE` 模式中的通配符，关键字中的 `%`、`_` 按普通字符匹配
fn escape_like(keyword: &str) -> String {
    keyword.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// 员工搜索的行结构，额外携带窗口函数统计的总数
#[derive(Debug, sqlx::FromRow)]
struct EmployeeSearchRow {
    #[sqlx(flatten)]
    employee: EmployeeInfo,
    total_count: i64,
}

/// 员工仓库结构体
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// 创建新的员工仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl EmployeeRepositoryTrait for EmployeeRepository {
    async fn find_employees(&self) -> DatabaseResult<Vec<EmployeeInfo>> {
        debug!("🔍 查询全部员工");

        let sql = format!(
            "{} ORDER BY e.last_name, e.first_name, e.id",
            select_employees("employees")
        );
        let employees = sqlx::query_as::<_, EmployeeInfo>(&sql).fetch_all(&self.pool).await?;

        debug!("✅ 查询完成 - 共 {} 名员工", employees.len());
        Ok(employees)
    }

    /// 根据查询参数搜索员工
    ///
    /// # SQL 查询说明
    ///
    /// 1. 使用 `COUNT(*) OVER ()` 窗口函数在分页之前得到总记录数
    /// 2. 使用 `COALESCE` 处理可选的关键字参数，关键字同时匹配姓、名、父称和工号
    /// 3. 班组、服务类型使用 `$n::int IS NULL OR ...` 的形式实现可选过滤
    async fn search_employees(&self, search: EmployeeSearch) -> DatabaseResult<EmployeeSearchResult> {
        debug!("🔍 搜索员工 {:#?}", search);

        // 关键字用了两次，需要提前准备好两个参数
        let keyword_param = search.keyword.clone().unwrap_or_default();
        let like_param = search.keyword.map(|k| format!("%{}%", escape_like(&k))).unwrap_or_default();

        let sql = format!(
            r#"
            WITH filtered_employees AS (
                {base}
                WHERE (COALESCE($1, '') = ''
                       OR e.last_name ILIKE $2
                       OR e.first_name ILIKE $2
                       OR e.middle_name ILIKE $2
                       OR e.personnel_number ILIKE $2)
                  AND ($3::int IS NULL OR e.brigada_id = $3)
                  AND ($4::int IS NULL OR e.service_type_id = $4)
            )
            SELECT *, COUNT(*) OVER () AS total_count
            FROM filtered_employees
            ORDER BY last_name, first_name, id
            LIMIT $5 OFFSET $6
            "#,
            base = select_employees("employees")
        );

        let rows = sqlx::query_as::<_, EmployeeSearchRow>(&sql)
            .bind(keyword_param)
            .bind(like_param)
            .bind(search.brigada_id)
            .bind(search.service_type_id)
            .bind(search.page_size)
            .bind(search.offset)
            .fetch_all(&self.pool)
            .await?;

        let total = rows.first().map_or(0, |r| u32::try_from(r.total_count).unwrap_or(u32::MAX));
        let employees: Vec<EmployeeInfo> = rows.into_iter().map(|r| r.employee).collect();

        debug!("✅ 搜索完成 - 找到 {} 名员工，总计 {} 名", employees.len(), total);

        Ok(EmployeeSearchResult { employees, total })
    }

    async fn find_employees_by_brigada(&self, brigada_id: i32) -> DatabaseResult<Vec<EmployeeInfo>> {
        debug!("🔍 查询班组 {} 的员工", brigada_id);

        let sql = format!(
            "{} WHERE e.brigada_id = $1 ORDER BY e.last_name, e.first_name, e.id",
            select_employees("employees")
        );
        let employees = sqlx::query_as::<_, EmployeeInfo>(&sql)
            .bind(brigada_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(employees)
    }

    async fn get_employee_by_id(&self, id: i32) -> DatabaseResult<Option<EmployeeInfo>> {
        debug!("🔍 根据 ID 获取员工: {}", id);

        let sql = format!("{} WHERE e.id = $1", select_employees("employees"));
        let employee = sqlx::query_as::<_, EmployeeInfo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    async fn find_employee_by_personnel_number(&self, personnel_number: &str) -> DatabaseResult<Option<EmployeeInfo>> {
        let sql = format!("{} WHERE e.personnel_number = $1 LIMIT 1", select_employees("employees"));
        let employee = sqlx::query_as::<_, EmployeeInfo>(&sql)
            .bind(personnel_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    async fn count_employees_by_brigada(&self, brigada_id: i32) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE brigada_id = $1")
            .bind(brigada_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_employees_by_locomotive(&self, locomotive_id: i32) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE locomotive_id = $1")
            .bind(locomotive_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// 创建新员工
    ///
    /// # 返回值
    /// 返回创建的员工信息（带联表名称）
    async fn create_employee(&self, employee: EmployeeCreate) -> DatabaseResult<EmployeeInfo> {
        debug!("📝 创建员工: {:#?}", employee);

        let sql = format!(
            r#"
            WITH changed AS (
                INSERT INTO employees (personnel_number, last_name, first_name, middle_name, position, phone,
                                       birth_date, hire_date, service_type_id, work_type_id, brigada_id,
                                       locomotive_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, now(), now())
                RETURNING *
            )
            {}
            "#,
            select_employees("changed")
        );
        let employee = sqlx::query_as::<_, EmployeeInfo>(&sql)
            .bind(employee.personnel_number)
            .bind(employee.last_name)
            .bind(employee.first_name)
            .bind(employee.middle_name)
            .bind(employee.position)
            .bind(employee.phone)
            .bind(employee.birth_date)
            .bind(employee.hire_date)
            .bind(employee.service_type_id)
            .bind(employee.work_type_id)
            .bind(employee.brigada_id)
            .bind(employee.locomotive_id)
            .fetch_one(&self.pool)
            .await?;

        debug!("✅ 员工创建成功: {}", employee.id);
        Ok(employee)
    }

    /// 更新员工信息
    ///
    /// 与其他仓库一致，使用 `coalesce` 保证 `None` 字段不会清空原值。
    /// 外键列用 `CASE WHEN $set THEN $value` 区分"未提供"和"清空"
    async fn update_employee(&self, id: i32, update: EmployeeUpdate) -> DatabaseResult<Option<EmployeeInfo>> {
        debug!("🔄 更新员工 {} 信息: {:#?}", id, update);

        let sql = format!(
            r#"
            WITH changed AS (
                UPDATE employees
                SET personnel_number = coalesce($2, personnel_number),
                    last_name = coalesce($3, last_name),
                    first_name = coalesce($4, first_name),
                    middle_name = coalesce($5, middle_name),
                    position = coalesce($6, position),
                    phone = coalesce($7, phone),
                    birth_date = coalesce($8, birth_date),
                    hire_date = coalesce($9, hire_date),
                    service_type_id = CASE WHEN $10 THEN $11 ELSE service_type_id END,
                    work_type_id = CASE WHEN $12 THEN $13 ELSE work_type_id END,
                    brigada_id = CASE WHEN $14 THEN $15 ELSE brigada_id END,
                    locomotive_id = CASE WHEN $16 THEN $17 ELSE locomotive_id END,
                    updated_at = now()
                WHERE id = $1
                RETURNING *
            )
            {}
            "#,
            select_employees("changed")
        );
        let employee = sqlx::query_as::<_, EmployeeInfo>(&sql)
            .bind(id)
            .bind(update.personnel_number)
            .bind(update.last_name)
            .bind(update.first_name)
            .bind(update.middle_name)
            .bind(update.position)
            .bind(update.phone)
            .bind(update.birth_date)
            .bind(update.hire_date)
            .bind(update.service_type_id.is_some())
            .bind(update.service_type_id.flatten())
            .bind(update.work_type_id.is_some())
            .bind(update.work_type_id.flatten())
            .bind(update.brigada_id.is_some())
            .bind(update.brigada_id.flatten())
            .bind(update.locomotive_id.is_some())
            .bind(update.locomotive_id.flatten())
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    async fn update_employee_photo(&self, id: i32, photo: &str) -> DatabaseResult<Option<EmployeeInfo>> {
        debug!("🖼️ 更新员工 {} 照片: {}", id, photo);

        let sql = format!(
            r#"
            WITH changed AS (
                UPDATE employees
                SET photo = $2,
                    updated_at = now()
                WHERE id = $1
                RETURNING *
            )
            {}
            "#,
            select_employees("changed")
        );
        let employee = sqlx::query_as::<_, EmployeeInfo>(&sql)
            .bind(id)
            .bind(photo)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    async fn delete_employee(&self, id: i32) -> DatabaseResult<Option<EmployeeInfo>> {
        debug!("🗑️ 删除员工: {}", id);

        let sql = format!(
            r#"
            WITH changed AS (
                DELETE FROM employees
                WHERE id = $1
                RETURNING *
            )
            {}
            "#,
            select_employees("changed")
        );
        let employee = sqlx::query_as::<_, EmployeeInfo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("Иван"), "Иван");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
