//! 初始数据
//!
//! local 环境启动时写入示例商品，便于直接浏览接口

use tracing::info;

use crate::error::Result;
use crate::models::{Item, NewItem};
use crate::repository::ItemRepositoryTrait;

/// 示例商品
pub fn sample_items() -> Vec<NewItem> {
    vec![
        NewItem::new("itemA", 10000, 10),
        NewItem::new("itemB", 20000, 20),
    ]
}

/// 写入示例商品
pub async fn init_test_data<R>(repository: &R) -> Result<Vec<Item>>
where
    R: ItemRepositoryTrait + ?Sized,
{
    info!("test data init");

    let mut saved = Vec::new();
    for item in sample_items() {
        saved.push(repository.save(item).await?);
    }

    Ok(saved)
}
