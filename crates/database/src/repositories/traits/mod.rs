//! 数据库仓库 trait 定义
//!
//! 这里定义了各种数据库仓库的抽象接口
//!
//! ## Repository Trait 设计模式 🎯
//!
//! 所有 Repository trait 都遵循统一的约束：
//!
//! ```rust,ignore
//! #[async_trait::async_trait]
//! pub trait XxxRepositoryTrait: Send + Sync + 'static {
//!     // 异步方法定义...
//! }
//! ```
//!
//! ### Trait 约束说明 📚
//!
//! - `Send`：异步方法返回的 `Future` 需要在不同线程间传递
//! - `Sync`：多个并发请求同时访问同一个 Repository 实例
//! - `'static`：作为应用服务长期运行，不依赖于短期引用
//!
//! 与只有一个仓库的场景不同，这里有八个实体，Web 层通过 [`crate::Repositories`]
//! 以 `Arc<dyn XxxRepositoryTrait>` 的形式持有它们：
//!
//! ```rust,ignore
//! let repositories = Repositories::postgres(pool.clone());
//! let leaves = repositories.leaves.find_active_leaves(today).await?;
//! ```
//!
//! `#[async_trait]` 会把异步方法转换为返回 `Pin<Box<dyn Future>>` 的普通方法，
//! 因此这些 trait 都是对象安全的。测试中可以用内存实现替换 PostgreSQL 实现。
//!
//! ### 约定 ✅
//!
//! 1. **按 ID 操作返回 `Option`**：`get_*`/`update_*`/`delete_*` 在记录不存在时返回 `None`，
//!    由服务层决定转换为 404
//! 2. **统一错误**：使用 `DatabaseResult<T>`
//! 3. **`None` 即不修改**：更新参数中的 `None` 字段保持数据库中的原值

pub mod brigada;
pub mod employee;
pub mod leave;
pub mod leave_type;
pub mod location;
pub mod locomotive;
pub mod service_type;
pub mod work_type;

// 重新导出
pub use brigada::BrigadaRepositoryTrait;
pub use employee::EmployeeRepositoryTrait;
pub use leave::LeaveRepositoryTrait;
pub use leave_type::LeaveTypeRepositoryTrait;
pub use location::LocationRepositoryTrait;
pub use locomotive::LocomotiveRepositoryTrait;
pub use service_type::ServiceTypeRepositoryTrait;
pub use work_type::WorkTypeRepositoryTrait;
