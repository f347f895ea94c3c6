//! Repository trait 定义

use async_trait::async_trait;
use errors::AppResult;

/// 基础 Repository trait
///
/// 只提供按 ID 与全表访问，不包含自定义查询。
#[async_trait]
pub trait Repository<T, ID>: Send + Sync {
    /// 保存实体，返回带有已分配标识的实体
    async fn save(&self, entity: T) -> AppResult<T>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: &ID) -> AppResult<Option<T>>;

    /// 查询全部
    async fn find_all(&self) -> AppResult<Vec<T>>;

    /// 统计总数
    async fn count(&self) -> AppResult<u64>;

    /// 检查是否存在
    async fn exists(&self, id: &ID) -> AppResult<bool>;

    /// 删除实体
    async fn delete(&self, id: &ID) -> AppResult<()>;
}
