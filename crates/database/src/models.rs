//! 数据库模型模块
//!
//! 这里定义与数据库表对应的结构体和相关操作

pub mod brigada;
pub mod employee;
pub mod leave;
pub mod leave_type;
pub mod location;
pub mod locomotive;
pub mod service_type;
pub mod work_type;

// 重新导出具体的模型
pub use brigada::{BrigadaCreate, BrigadaInfo, BrigadaUpdate};
pub use employee::{EmployeeCreate, EmployeeInfo, EmployeeSearch, EmployeeSearchResult, EmployeeUpdate};
pub use leave::{
    ranges_overlap, touches_day, LeaveCreate, LeaveFilter, LeaveInfo, LeaveStatistics, LeaveStatus, LeaveTypeCount,
    LeaveUpdate,
};
pub use leave_type::{LeaveTypeCreate, LeaveTypeInfo, LeaveTypeUpdate};
pub use location::{LocationCreate, LocationInfo, LocationUpdate};
pub use locomotive::{LocomotiveCreate, LocomotiveInfo, LocomotiveUpdate};
pub use service_type::{ServiceTypeCreate, ServiceTypeInfo, ServiceTypeUpdate};
pub use work_type::{WorkTypeCreate, WorkTypeInfo, WorkTypeUpdate};
