//! 商品服务
//!
//! 业务逻辑很薄，主要负责委托仓储并补充日志

use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::{ItemError, Result};
use crate::models::{Item, ItemSearchCond, ItemUpdate, NewItem};
use crate::repository::ItemRepositoryTrait;

/// 商品服务
pub struct ItemService<R>
where
    R: ItemRepositoryTrait + ?Sized,
{
    repository: Arc<R>,
}

impl<R> ItemService<R>
where
    R: ItemRepositoryTrait + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// 保存商品
    #[instrument(skip(self, item), fields(item_name = %item.item_name))]
    pub async fn save(&self, item: NewItem) -> Result<Item> {
        let saved = self.repository.save(item).await?;
        info!(item_id = saved.id, "Item saved");
        Ok(saved)
    }

    /// 更新商品
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: i64, update: ItemUpdate) -> Result<()> {
        self.repository.update(id, update).await?;
        info!(item_id = id, "Item updated");
        Ok(())
    }

    /// 按 ID 查询
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Item>> {
        self.repository.find_by_id(id).await
    }

    /// 按 ID 获取，不存在时返回 ItemNotFound
    pub async fn get_item(&self, id: i64) -> Result<Item> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ItemError::ItemNotFound(id))
    }

    /// 按条件查询商品
    #[instrument(skip(self))]
    pub async fn find_items(&self, cond: &ItemSearchCond) -> Result<Vec<Item>> {
        self.repository.find_all(cond).await
    }
}
