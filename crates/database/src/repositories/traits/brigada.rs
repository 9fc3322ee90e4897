//! 班组仓库 trait 定义

use crate::models::brigada::{BrigadaCreate, BrigadaInfo, BrigadaUpdate};
use crate::DatabaseResult;

/// 班组仓库trait定义
///
/// 定义了班组相关的数据库操作接口，支持：
/// - 班组列表查询
/// - 班组创建
/// - 班组查询（按 ID / 名称）
/// - 班组更新
/// - 班组删除
#[async_trait::async_trait]
pub trait BrigadaRepositoryTrait: Send + Sync + 'static {
    /// 查询全部班组，按名称排序
    async fn find_brigades(&self) -> DatabaseResult<Vec<BrigadaInfo>>;

    /// 根据 ID 获取班组信息
    ///
    /// # 返回值
    /// 班组不存在时返回 `None`
    async fn get_brigada_by_id(&self, id: i32) -> DatabaseResult<Option<BrigadaInfo>>;

    /// 根据名称精确查找班组
    async fn find_brigada_by_name(&self, name: &str) -> DatabaseResult<Option<BrigadaInfo>>;

    /// 创建新班组
    async fn create_brigada(&self, brigada: BrigadaCreate) -> DatabaseResult<BrigadaInfo>;

    /// 更新班组信息
    ///
    /// # 参数
    /// - `id`: 班组 ID
    /// - `update`: 更新信息，`None` 字段保持原值
    async fn update_brigada(&self, id: i32, update: BrigadaUpdate) -> DatabaseResult<Option<BrigadaInfo>>;

    /// 删除班组，返回被删除的班组信息
    async fn delete_brigada(&self, id: i32) -> DatabaseResult<Option<BrigadaInfo>>;
}
