//! 假期服务
//!
//! 在仓库之上实现假期规则：
//!
//! - 同一员工的假期区间（闭区间）不允许相交，冲突时返回全部冲突的假期
//! - 编辑假期时排除自身再做冲突检查
//! - 并发写入绕过预检查时，数据库排他约束 `leaves_no_overlap` 兜底，仍返回冲突列表
//! - 状态查询（进行中、即将开始、今日）以 [`Clock`] 给出的当天日期为基准

use crate::models::err::{AppError, AppResult};
use crate::models::leave::LeaveInfo as LeaveView;
use crate::services::{require, Clock};
use chrono::NaiveDate;
use database::{
    DatabaseError, EmployeeRepositoryTrait, LeaveCreate, LeaveFilter, LeaveInfo, LeaveRepositoryTrait, LeaveStatistics,
    LeaveTypeRepositoryTrait, LeaveUpdate, Repositories,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct LeaveService {
    leaves: Arc<dyn LeaveRepositoryTrait>,
    employees: Arc<dyn EmployeeRepositoryTrait>,
    leave_types: Arc<dyn LeaveTypeRepositoryTrait>,
    clock: Clock,
}

impl LeaveService {
    pub fn new(repositories: &Repositories, clock: Clock) -> Self {
        Self {
            leaves: repositories.leaves.clone(),
            employees: repositories.employees.clone(),
            leave_types: repositories.leave_types.clone(),
            clock,
        }
    }

    /// 当天日期
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    #[instrument(skip(self))]
    pub async fn find_leaves(&self, filter: LeaveFilter) -> AppResult<Vec<LeaveInfo>> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(AppError::bad_request(format!("Window start {from} is after window end {to}")));
            }
        }
        Ok(self.leaves.find_leaves(filter).await?)
    }

    /// 某个员工的全部假期，员工不存在时返回 404
    pub async fn find_employee_leaves(&self, employee_id: i32) -> AppResult<Vec<LeaveInfo>> {
        self.ensure_employee(employee_id).await?;
        let filter = LeaveFilter {
            employee_id: Some(employee_id),
            ..Default::default()
        };
        Ok(self.leaves.find_leaves(filter).await?)
    }

    pub async fn get_leave(&self, id: i32) -> AppResult<LeaveInfo> {
        require(self.leaves.get_leave_by_id(id).await?, "Leave", id)
    }

    pub async fn find_active_leaves(&self) -> AppResult<Vec<LeaveInfo>> {
        Ok(self.leaves.find_active_leaves(self.today()).await?)
    }

    pub async fn find_upcoming_leaves(&self) -> AppResult<Vec<LeaveInfo>> {
        Ok(self.leaves.find_upcoming_leaves(self.today()).await?)
    }

    pub async fn find_today_leaves(&self) -> AppResult<Vec<LeaveInfo>> {
        Ok(self.leaves.find_leaves_for_day(self.today()).await?)
    }

    pub async fn leave_statistics(&self) -> AppResult<LeaveStatistics> {
        Ok(self.leaves.leave_statistics(self.today()).await?)
    }

    /// 冲突预检查，只查询不写入
    #[instrument(skip(self))]
    pub async fn check_conflicts(
        &self,
        employee_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> AppResult<Vec<LeaveInfo>> {
        ensure_range(start_date, end_date)?;
        self.ensure_employee(employee_id).await?;
        Ok(self
            .leaves
            .find_overlapping_leaves(employee_id, start_date, end_date, exclude_id)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn create_leave(&self, leave: LeaveCreate) -> AppResult<LeaveInfo> {
        ensure_range(leave.start_date, leave.end_date)?;
        self.ensure_employee(leave.employee_id).await?;
        self.ensure_leave_type(leave.leave_type_id).await?;
        let (employee_id, start_date, end_date) = (leave.employee_id, leave.start_date, leave.end_date);
        self.ensure_no_overlap(employee_id, start_date, end_date, None).await?;

        let leave = match self.leaves.create_leave(leave).await {
            Ok(leave) => leave,
            Err(err) => return Err(self.write_error(err, employee_id, start_date, end_date, None).await),
        };
        info!(
            "🏖️ 新假期 #{}: {} {} ~ {}",
            leave.id, leave.employee_name, leave.start_date, leave.end_date
        );
        Ok(leave)
    }

    /// 更新假期
    ///
    /// 未提供的字段沿用原值，按合并后的员工与区间重新做冲突检查
    #[instrument(skip(self))]
    pub async fn update_leave(&self, id: i32, update: LeaveUpdate) -> AppResult<LeaveInfo> {
        let current = self.get_leave(id).await?;

        let employee_id = update.employee_id.unwrap_or(current.employee_id);
        let start_date = update.start_date.unwrap_or(current.start_date);
        let end_date = update.end_date.unwrap_or(current.end_date);
        ensure_range(start_date, end_date)?;

        if employee_id != current.employee_id {
            self.ensure_employee(employee_id).await?;
        }
        if let Some(leave_type_id) = update.leave_type_id.filter(|t| *t != current.leave_type_id) {
            self.ensure_leave_type(leave_type_id).await?;
        }
        self.ensure_no_overlap(employee_id, start_date, end_date, Some(id)).await?;

        match self.leaves.update_leave(id, update).await {
            Ok(leave) => require(leave, "Leave", id),
            Err(err) => Err(self.write_error(err, employee_id, start_date, end_date, Some(id)).await),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_leave(&self, id: i32) -> AppResult<LeaveInfo> {
        require(self.leaves.delete_leave(id).await?, "Leave", id)
    }

    async fn ensure_employee(&self, employee_id: i32) -> AppResult<()> {
        require(self.employees.get_employee_by_id(employee_id).await?, "Employee", employee_id)?;
        Ok(())
    }

    async fn ensure_leave_type(&self, leave_type_id: i32) -> AppResult<()> {
        require(
            self.leave_types.get_leave_type_by_id(leave_type_id).await?,
            "Leave type",
            leave_type_id,
        )?;
        Ok(())
    }

    async fn ensure_no_overlap(
        &self,
        employee_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        let conflicts = self
            .leaves
            .find_overlapping_leaves(employee_id, start_date, end_date, exclude_id)
            .await?;
        if conflicts.is_empty() {
            return Ok(());
        }

        warn!(
            "⚠️ 员工 {} 的假期 {} ~ {} 与 {} 条已有假期冲突",
            employee_id,
            start_date,
            end_date,
            conflicts.len()
        );
        let today = self.today();
        Err(AppError::LeaveConflict {
            message: format!(
                "Leave {start_date} ~ {end_date} overlaps {} existing leave(s) of this employee",
                conflicts.len()
            ),
            conflicts: LeaveView::from_records(conflicts, today),
        })
    }

    /// 写入失败时的错误转换
    ///
    /// 排他约束冲突说明有并发写入抢先保存了相交的假期，重新查询后按冲突返回
    async fn write_error(
        &self,
        err: DatabaseError,
        employee_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> AppError {
        if !err.is_exclusion_violation() {
            return err.into();
        }
        match self.ensure_no_overlap(employee_id, start_date, end_date, exclude_id).await {
            Err(conflict) => conflict,
            Ok(()) => err.into(),
        }
    }
}

fn ensure_range(start_date: NaiveDate, end_date: NaiveDate) -> AppResult<()> {
    if start_date > end_date {
        return Err(AppError::bad_request(format!(
            "Start date {start_date} is after end date {end_date}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_range_is_bad_request() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(matches!(ensure_range(start, end), Err(AppError::BadRequest(_))));
        assert!(ensure_range(end, end).is_ok());
    }
}
