//! 🔧 共享库模块
//!
//! 这个模块包含了在多个服务之间共享的通用代码，目前主要是程序配置 [`AppConfig`]

pub mod models;

// 重新导出常用类型
pub use models::AppConfig;
