//! 数据库仓库模块
//!
//! 这里定义数据库操作的Repository层

pub mod brigada;
pub mod employee;
pub mod leave;
pub mod leave_type;
pub mod location;
pub mod locomotive;
pub mod service_type;
pub mod traits;
pub mod work_type;

use crate::DatabasePool;
use std::sync::Arc;

// 重新导出具体的类型
pub use brigada::BrigadaRepository;
pub use employee::EmployeeRepository;
pub use leave::LeaveRepository;
pub use leave_type::LeaveTypeRepository;
pub use location::LocationRepository;
pub use locomotive::LocomotiveRepository;
pub use service_type::ServiceTypeRepository;
pub use traits::{
    BrigadaRepositoryTrait, EmployeeRepositoryTrait, LeaveRepositoryTrait, LeaveTypeRepositoryTrait,
    LocationRepositoryTrait, LocomotiveRepositoryTrait, ServiceTypeRepositoryTrait, WorkTypeRepositoryTrait,
};
pub use work_type::WorkTypeRepository;

/// 全部仓库的集合
///
/// 每个仓库都以 trait object 的形式持有，clone 只会增加引用计数。
/// 生产环境使用 [`Repositories::postgres`]，测试中可以直接填入内存实现。
#[derive(Clone)]
pub struct Repositories {
    pub service_types: Arc<dyn ServiceTypeRepositoryTrait>,
    pub work_types: Arc<dyn WorkTypeRepositoryTrait>,
    pub brigades: Arc<dyn BrigadaRepositoryTrait>,
    pub locations: Arc<dyn LocationRepositoryTrait>,
    pub locomotives: Arc<dyn LocomotiveRepositoryTrait>,
    pub employees: Arc<dyn EmployeeRepositoryTrait>,
    pub leave_types: Arc<dyn LeaveTypeRepositoryTrait>,
    pub leaves: Arc<dyn LeaveRepositoryTrait>,
}

impl Repositories {
    /// 基于同一个 PostgreSQL 连接池创建全部仓库
    pub fn postgres(pool: DatabasePool) -> Self {
        Self {
            service_types: Arc::new(ServiceTypeRepository::new(pool.clone())),
            work_types: Arc::new(WorkTypeRepository::new(pool.clone())),
            brigades: Arc::new(BrigadaRepository::new(pool.clone())),
            locations: Arc::new(LocationRepository::new(pool.clone())),
            locomotives: Arc::new(LocomotiveRepository::new(pool.clone())),
            employees: Arc::new(EmployeeRepository::new(pool.clone())),
            leave_types: Arc::new(LeaveTypeRepository::new(pool.clone())),
            leaves: Arc::new(LeaveRepository::new(pool)),
        }
    }
}
