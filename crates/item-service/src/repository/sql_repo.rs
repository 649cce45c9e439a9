//! SQL 商品仓储
//!
//! 基于 SQLx 访问 item 表，查询条件按需动态拼接

use std::time::Instant;

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use super::observe;
use super::traits::ItemRepositoryTrait;
use crate::error::{ItemError, Result};
use crate::models::{Item, ItemSearchCond, ItemUpdate, NewItem};

const BACKEND: &str = "sql";

/// SQL 商品仓储
#[derive(Debug, Clone)]
pub struct SqlItemRepository {
    pool: SqlitePool,
}

impl SqlItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 插入商品，使用数据库生成的自增 ID
    pub async fn insert(&self, item: NewItem) -> Result<Item> {
        let result = sqlx::query(
            r#"
            INSERT INTO item (item_name, price, quantity)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&item.item_name)
        .bind(item.price)
        .bind(item.quantity)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(item_id = id, item_name = %item.item_name, "Item inserted");

        Ok(item.with_id(id))
    }

    /// 更新商品
    pub async fn update_item(&self, id: i64, update: &ItemUpdate) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE item
            SET item_name = ?, price = ?, quantity = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.item_name)
        .bind(update.price)
        .bind(update.quantity)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ItemError::ItemNotFound(id));
        }

        Ok(())
    }

    /// 按 ID 查询
    pub async fn get_item(&self, id: i64) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, item_name, price, quantity
            FROM item
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// 按条件查询
    pub async fn search(&self, cond: &ItemSearchCond) -> Result<Vec<Item>> {
        let mut query = build_search_query(cond);
        debug!(sql = %query.sql(), unfiltered = cond.is_empty(), "Searching items");

        let items = query
            .build_query_as::<Item>()
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }
}

/// 构建动态查询
///
/// 只有存在生效条件时才追加 WHERE，AND 只出现在两个条件之间。
/// 名称匹配使用 instr，搜索文本中的 % 和 _ 按字面匹配。
pub(crate) fn build_search_query(cond: &ItemSearchCond) -> QueryBuilder<'static, Sqlite> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT id, item_name, price, quantity FROM item");
    let mut has_where = false;

    if let Some(name) = cond.name_filter() {
        query
            .push(" WHERE instr(item_name, ")
            .push_bind(name.to_string())
            .push(") > 0");
        has_where = true;
    }

    if let Some(max_price) = cond.max_price {
        query.push(if has_where { " AND " } else { " WHERE " });
        query.push("price <= ").push_bind(max_price);
    }

    query.push(" ORDER BY id ASC");
    query
}

#[async_trait]
impl ItemRepositoryTrait for SqlItemRepository {
    async fn save(&self, item: NewItem) -> Result<Item> {
        let start = Instant::now();
        let result = self.insert(item).await;
        observe(BACKEND, "save", start, &result);
        result
    }

    async fn update(&self, id: i64, update: ItemUpdate) -> Result<()> {
        let start = Instant::now();
        let result = self.update_item(id, &update).await;
        observe(BACKEND, "update", start, &result);
        result
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>> {
        let start = Instant::now();
        let result = self.get_item(id).await;
        observe(BACKEND, "find_by_id", start, &result);
        result
    }

    async fn find_all(&self, cond: &ItemSearchCond) -> Result<Vec<Item>> {
        let start = Instant::now();
        let result = self.search(cond).await;
        observe(BACKEND, "find_all", start, &result);
        result
    }
}
