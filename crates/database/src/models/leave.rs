//! 员工假期数据库模型
//!
//! 除了与 `leaves` 表对应的结构体之外，这里还定义了假期区间的判定规则：
//!
//! - 区间冲突：同一员工的两段假期 `[a_start, a_end]` 与 `[b_start, b_end]`（闭区间）
//!   当且仅当 `a_start <= b_end && a_end >= b_start` 时冲突
//! - 状态划分：以当天零点为基准，当天落在区间内为 [`LeaveStatus::Active`]，
//!   开始日期晚于当天为 [`LeaveStatus::Upcoming`]，其余为 [`LeaveStatus::Past`]
//!
//! 仓库层的 SQL 查询与这里的判定保持一致，内存实现（测试用）直接复用这些函数。

use chrono::NaiveDate;

/// 假期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaveStatus {
    /// 正在休假
    Active,
    /// 尚未开始
    Upcoming,
    /// 已经结束
    Past,
}

impl LeaveStatus {
    /// 根据当天日期划分假期状态
    pub fn classify(start_date: NaiveDate, end_date: NaiveDate, today: NaiveDate) -> Self {
        if start_date <= today && today <= end_date {
            Self::Active
        } else if start_date > today {
            Self::Upcoming
        } else {
            Self::Past
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Upcoming => "upcoming",
            Self::Past => "past",
        }
    }
}

/// 两个闭区间是否有交集
pub fn ranges_overlap(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// "今日假期"判定：当天处于区间内，或者任一端点落在 `[today, tomorrow)` 内
pub fn touches_day(start_date: NaiveDate, end_date: NaiveDate, today: NaiveDate) -> bool {
    let tomorrow = today.succ_opt().unwrap_or(today);
    let in_window = |d: NaiveDate| d >= today && d < tomorrow;
    (start_date <= today && end_date >= today) || in_window(start_date) || in_window(end_date)
}

/// 假期信息，附带员工姓名与假期类型名称
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaveInfo {
    pub id: i32,
    pub employee_id: i32,
    pub employee_name: String,
    pub leave_type_id: i32,
    pub leave_type_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub comment: Option<String>,
}

impl LeaveInfo {
    pub fn status(&self, today: NaiveDate) -> LeaveStatus {
        LeaveStatus::classify(self.start_date, self.end_date, today)
    }

    /// 假期天数（含首尾两天）
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn overlaps(&self, start_date: NaiveDate, end_date: NaiveDate) -> bool {
        ranges_overlap(self.start_date, self.end_date, start_date, end_date)
    }
}

/// 假期列表过滤条件，所有条件均为可选
///
/// `from`/`to` 构成查询窗口，返回与窗口有交集的假期
#[derive(Debug, Clone, Default)]
pub struct LeaveFilter {
    pub employee_id: Option<i32>,
    pub leave_type_id: Option<i32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl LeaveFilter {
    pub fn matches(&self, leave: &LeaveInfo) -> bool {
        self.employee_id.map_or(true, |id| leave.employee_id == id)
            && self.leave_type_id.map_or(true, |id| leave.leave_type_id == id)
            && self.from.map_or(true, |from| leave.end_date >= from)
            && self.to.map_or(true, |to| leave.start_date <= to)
    }
}

/// 假期创建参数
#[derive(Debug, Clone)]
pub struct LeaveCreate {
    pub employee_id: i32,
    pub leave_type_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub comment: Option<String>,
}

/// 假期更新参数
#[derive(Debug, Clone, Default)]
pub struct LeaveUpdate {
    pub employee_id: Option<i32>,
    pub leave_type_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub comment: Option<String>,
}

/// 单个假期类型的假期数量
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaveTypeCount {
    pub leave_type_id: i32,
    pub leave_type_name: String,
    pub count: i64,
}

/// 假期统计信息
#[derive(Debug, Clone, Default)]
pub struct LeaveStatistics {
    pub total: i64,
    pub active: i64,
    pub upcoming: i64,
    pub past: i64,
    /// 当天正在休假的员工人数（去重）
    pub employees_on_leave: i64,
    pub by_type: Vec<LeaveTypeCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn overlap_uses_closed_bounds() {
        // 首尾相接也算冲突
        assert!(ranges_overlap(d(2024, 7, 1), d(2024, 7, 10), d(2024, 7, 10), d(2024, 7, 20)));
        assert!(ranges_overlap(d(2024, 7, 10), d(2024, 7, 20), d(2024, 7, 1), d(2024, 7, 10)));
        // 包含
        assert!(ranges_overlap(d(2024, 7, 1), d(2024, 7, 31), d(2024, 7, 5), d(2024, 7, 6)));
        // 相邻但不相交
        assert!(!ranges_overlap(d(2024, 7, 1), d(2024, 7, 9), d(2024, 7, 10), d(2024, 7, 20)));
        assert!(!ranges_overlap(d(2024, 7, 21), d(2024, 7, 22), d(2024, 7, 10), d(2024, 7, 20)));
    }

    #[test]
    fn classify_boundaries() {
        let today = d(2024, 3, 15);
        assert_eq!(LeaveStatus::classify(d(2024, 3, 15), d(2024, 3, 15), today), LeaveStatus::Active);
        assert_eq!(LeaveStatus::classify(d(2024, 3, 1), d(2024, 3, 15), today), LeaveStatus::Active);
        assert_eq!(LeaveStatus::classify(d(2024, 3, 16), d(2024, 3, 20), today), LeaveStatus::Upcoming);
        assert_eq!(LeaveStatus::classify(d(2024, 3, 1), d(2024, 3, 14), today), LeaveStatus::Past);
    }

    #[test]
    fn touches_day_matches_active_and_bounds() {
        let today = d(2024, 3, 15);
        assert!(touches_day(d(2024, 3, 10), d(2024, 3, 20), today));
        assert!(touches_day(d(2024, 3, 15), d(2024, 3, 18), today));
        assert!(touches_day(d(2024, 3, 1), d(2024, 3, 15), today));
        assert!(!touches_day(d(2024, 3, 16), d(2024, 3, 18), today));
        assert!(!touches_day(d(2024, 3, 1), d(2024, 3, 14), today));
    }

    #[test]
    fn days_are_inclusive() {
        let leave = LeaveInfo {
            id: 1,
            employee_id: 1,
            employee_name: "Ivanov Ivan".to_string(),
            leave_type_id: 1,
            leave_type_name: "vacation".to_string(),
            start_date: d(2024, 2, 28),
            end_date: d(2024, 3, 1),
            comment: None,
        };
        // 2024 为闰年
        assert_eq!(leave.days(), 3);
        assert_eq!(leave.status(d(2024, 2, 29)).as_str(), "active");
    }

    #[test]
    fn filter_window_uses_overlap() {
        let leave = LeaveInfo {
            id: 1,
            employee_id: 7,
            employee_name: "Petrov Petr".to_string(),
            leave_type_id: 2,
            leave_type_name: "sick".to_string(),
            start_date: d(2024, 5, 10),
            end_date: d(2024, 5, 20),
            comment: None,
        };
        let window = LeaveFilter { from: Some(d(2024, 5, 20)), to: Some(d(2024, 5, 31)), ..Default::default() };
        assert!(window.matches(&leave));

        let other_employee = LeaveFilter { employee_id: Some(8), ..Default::default() };
        assert!(!other_employee.matches(&leave));

        let before = LeaveFilter { to: Some(d(2024, 5, 9)), ..Default::default() };
        assert!(!before.matches(&leave));
    }
}
