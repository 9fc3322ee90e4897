use crate::models::common::trim_optional;
use chrono::NaiveDate;
use database::LeaveStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// 开始日期不能晚于结束日期
fn validate_date_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), ValidationError> {
    if start_date > end_date {
        return Err(ValidationError::new("date_range").with_message("start_date must not be after end_date".into()));
    }
    Ok(())
}

fn validate_leave_create(leave: &LeaveCreate) -> Result<(), ValidationError> {
    validate_date_range(leave.start_date, leave.end_date)
}

fn validate_conflict_check(check: &ConflictCheck) -> Result<(), ValidationError> {
    validate_date_range(check.start_date, check.end_date)
}

/// 假期列表的查询参数
///
/// `from`/`to` 为可选的日期窗口，返回与窗口有交集的假期
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaveQuery {
    pub employee_id: Option<i32>,
    pub leave_type_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl From<LeaveQuery> for database::LeaveFilter {
    fn from(value: LeaveQuery) -> Self {
        Self {
            employee_id: value.employee_id,
            leave_type_id: value.leave_type_id,
            from: value.from,
            to: value.to,
        }
    }
}

/// 新建假期
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[validate(schema(function = "validate_leave_create"))]
pub struct LeaveCreate {
    #[schema(example = 15)]
    #[validate(range(min = 1))]
    pub employee_id: i32,

    #[schema(example = 1)]
    #[validate(range(min = 1))]
    pub leave_type_id: i32,

    #[schema(example = "2024-07-01")]
    pub start_date: NaiveDate,

    #[schema(example = "2024-07-14")]
    pub end_date: NaiveDate,

    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

/// 更新假期，未提供的字段保持原值
///
/// 合并后的日期区间在服务层校验
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LeaveUpdate {
    #[validate(range(min = 1))]
    pub employee_id: Option<i32>,

    #[validate(range(min = 1))]
    pub leave_type_id: Option<i32>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

/// 冲突预检查参数，不写入数据
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[validate(schema(function = "validate_conflict_check"))]
pub struct ConflictCheck {
    #[validate(range(min = 1))]
    pub employee_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// 编辑已有假期时传入其 ID，避免与自身冲突
    pub exclude_id: Option<i32>,
}

/// 冲突预检查结果
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct ConflictReport {
    pub has_conflicts: bool,
    pub conflicts: Vec<LeaveInfo>,
}

/// 假期状态
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveState {
    Active,
    Upcoming,
    Past,
}

impl From<LeaveStatus> for LeaveState {
    fn from(value: LeaveStatus) -> Self {
        match value {
            LeaveStatus::Active => Self::Active,
            LeaveStatus::Upcoming => Self::Upcoming,
            LeaveStatus::Past => Self::Past,
        }
    }
}

/// 假期信息
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize)]
pub struct LeaveInfo {
    pub id: i32,
    pub employee_id: i32,
    #[schema(example = "Иванов Иван Иванович")]
    pub employee_name: String,
    pub leave_type_id: i32,
    pub leave_type_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub comment: Option<String>,
    /// 以当天为基准的状态
    pub status: LeaveState,
    /// 假期天数（含首尾两天）
    #[schema(example = 14)]
    pub days: i64,
}

impl LeaveInfo {
    /// 根据当天日期补充状态字段
    pub fn from_record(record: database::LeaveInfo, today: NaiveDate) -> Self {
        let status = record.status(today).into();
        let days = record.days();
        Self {
            id: record.id,
            employee_id: record.employee_id,
            employee_name: record.employee_name,
            leave_type_id: record.leave_type_id,
            leave_type_name: record.leave_type_name,
            start_date: record.start_date,
            end_date: record.end_date,
            comment: record.comment,
            status,
            days,
        }
    }

    pub fn from_records(records: Vec<database::LeaveInfo>, today: NaiveDate) -> Vec<Self> {
        records.into_iter().map(|r| Self::from_record(r, today)).collect()
    }
}

/// 按假期类型的数量
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct LeaveTypeCount {
    pub leave_type_id: i32,
    pub leave_type_name: String,
    pub count: i64,
}

/// 假期统计
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct LeaveStatistics {
    /// 统计基准日期
    pub date: NaiveDate,
    pub total: i64,
    pub active: i64,
    pub upcoming: i64,
    pub past: i64,
    /// 当天正在休假的员工人数
    pub employees_on_leave: i64,
    pub by_type: Vec<LeaveTypeCount>,
}

impl LeaveStatistics {
    pub fn from_record(record: database::LeaveStatistics, date: NaiveDate) -> Self {
        Self {
            date,
            total: record.total,
            active: record.active,
            upcoming: record.upcoming,
            past: record.past,
            employees_on_leave: record.employees_on_leave,
            by_type: record
                .by_type
                .into_iter()
                .map(|t| LeaveTypeCount {
                    leave_type_id: t.leave_type_id,
                    leave_type_name: t.leave_type_name,
                    count: t.count,
                })
                .collect(),
        }
    }
}

impl From<LeaveCreate> for database::LeaveCreate {
    fn from(value: LeaveCreate) -> Self {
        Self {
            employee_id: value.employee_id,
            leave_type_id: value.leave_type_id,
            start_date: value.start_date,
            end_date: value.end_date,
            comment: trim_optional(value.comment),
        }
    }
}

impl From<LeaveUpdate> for database::LeaveUpdate {
    fn from(value: LeaveUpdate) -> Self {
        Self {
            employee_id: value.employee_id,
            leave_type_id: value.leave_type_id,
            start_date: value.start_date,
            end_date: value.end_date,
            comment: trim_optional(value.comment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn reversed_range_fails_validation() {
        let leave = LeaveCreate {
            employee_id: 1,
            leave_type_id: 1,
            start_date: d(2024, 7, 10),
            end_date: d(2024, 7, 1),
            comment: None,
        };
        assert!(leave.validate().is_err());

        let single_day = LeaveCreate { end_date: d(2024, 7, 10), ..leave };
        assert!(single_day.validate().is_ok());
    }

    #[test]
    fn status_serializes_lowercase() {
        let record = database::LeaveInfo {
            id: 4,
            employee_id: 1,
            employee_name: "Иванов Иван".into(),
            leave_type_id: 2,
            leave_type_name: "Отпуск".into(),
            start_date: d(2024, 7, 1),
            end_date: d(2024, 7, 14),
            comment: None,
        };
        let info = LeaveInfo::from_record(record, d(2024, 6, 30));
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["status"], "upcoming");
        assert_eq!(value["days"], 14);
        assert_eq!(value["start_date"], "2024-07-01");
    }
}
