//! 内存商品仓储
//!
//! 使用 DashMap 实现的并发内存存储，适用于测试和无数据库的本地运行。

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use super::observe;
use super::traits::ItemRepositoryTrait;
use crate::error::{ItemError, Result};
use crate::models::{Item, ItemSearchCond, ItemUpdate, NewItem};

const BACKEND: &str = "memory";

/// 内存商品仓储
///
/// 克隆后共享同一份数据
#[derive(Debug, Clone)]
pub struct MemoryItemRepository {
    store: Arc<DashMap<i64, Item>>,
    sequence: Arc<AtomicI64>,
}

impl Default for MemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryItemRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            sequence: Arc::new(AtomicI64::new(0)),
        }
    }

    /// 清空所有数据（ID 序列不回退）
    pub fn clear_store(&self) {
        self.store.clear();
    }

    /// 当前商品数量
    pub fn count(&self) -> usize {
        self.store.len()
    }
}

#[async_trait]
impl ItemRepositoryTrait for MemoryItemRepository {
    async fn save(&self, item: NewItem) -> Result<Item> {
        let start = Instant::now();
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let item = item.with_id(id);
        self.store.insert(id, item.clone());
        debug!(item_id = id, "Item stored in memory");

        let result = Ok(item);
        observe(BACKEND, "save", start, &result);
        result
    }

    async fn update(&self, id: i64, update: ItemUpdate) -> Result<()> {
        let start = Instant::now();
        let result = match self.store.get_mut(&id) {
            Some(mut entry) => {
                update.apply_to(entry.value_mut());
                Ok(())
            }
            None => Err(ItemError::ItemNotFound(id)),
        };
        observe(BACKEND, "update", start, &result);
        result
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>> {
        let start = Instant::now();
        let result = Ok(self.store.get(&id).map(|entry| entry.value().clone()));
        observe(BACKEND, "find_by_id", start, &result);
        result
    }

    async fn find_all(&self, cond: &ItemSearchCond) -> Result<Vec<Item>> {
        let start = Instant::now();
        let mut items: Vec<Item> = self
            .store
            .iter()
            .filter(|entry| cond.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|item| item.id);

        let result = Ok(items);
        observe(BACKEND, "find_all", start, &result);
        result
    }
}
