//! 服务层模块
//!
//! 包含业务逻辑的服务层实现：唯一性校验、外键校验、删除前的依赖检查以及假期区间规则。
//! 服务只依赖仓库 trait，测试中可以注入内存实现。

pub mod brigada;
pub mod employee;
pub mod leave;
pub mod leave_type;
pub mod location;
pub mod locomotive;
pub mod photo;
pub mod service_type;
pub mod work_type;

pub use brigada::BrigadaService;
pub use employee::EmployeeService;
pub use leave::LeaveService;
pub use leave_type::LeaveTypeService;
pub use location::LocationService;
pub use locomotive::LocomotiveService;
pub use photo::PhotoStorage;
pub use service_type::ServiceTypeService;
pub use work_type::WorkTypeService;

use crate::models::err::{AppError, AppResult};
use chrono::NaiveDate;
use std::sync::Arc;

/// 提供"今天"日期的时钟
///
/// 假期状态都以本地日期为基准，测试中替换为固定日期
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// 服务器本地时区的当天日期
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn system_clock() -> Clock {
    Arc::new(local_today)
}

/// 仓库返回 `None` 时转换为 404
pub(crate) fn require<T>(value: Option<T>, entity: &str, id: i32) -> AppResult<T> {
    value.ok_or_else(|| AppError::not_found(entity, id))
}
