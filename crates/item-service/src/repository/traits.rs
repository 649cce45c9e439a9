//! 仓储 Trait 定义
//!
//! 服务层依赖抽象而非具体实现，存储后端可以在启动时切换，也便于 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Item, ItemSearchCond, ItemUpdate, NewItem};

/// 商品仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepositoryTrait: Send + Sync {
    /// 保存商品并返回带生成 ID 的实体
    async fn save(&self, item: NewItem) -> Result<Item>;

    /// 整体更新商品字段，商品不存在时返回 ItemNotFound
    async fn update(&self, id: i64, update: ItemUpdate) -> Result<()>;

    /// 按 ID 查询，不存在返回 None
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>>;

    /// 按条件查询，结果按 ID 升序
    async fn find_all(&self, cond: &ItemSearchCond) -> Result<Vec<Item>>;
}
