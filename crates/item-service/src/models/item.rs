//! 商品实体定义

use serde::{Deserialize, Serialize};

/// 商品名称最大字符数，与 item.item_name 列宽一致
pub const ITEM_NAME_MAX_CHARS: u64 = 10;

/// 已持久化的商品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    /// 商品名称
    pub item_name: String,
    /// 单价
    pub price: i32,
    /// 库存数量
    pub quantity: i32,
}

/// 尚未分配 ID 的商品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub item_name: String,
    pub price: i32,
    pub quantity: i32,
}

impl NewItem {
    pub fn new(item_name: impl Into<String>, price: i32, quantity: i32) -> Self {
        Self {
            item_name: item_name.into(),
            price,
            quantity,
        }
    }

    /// 绑定生成的 ID
    pub fn with_id(self, id: i64) -> Item {
        Item {
            id,
            item_name: self.item_name,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// 商品更新参数
///
/// 整体替换名称、价格、数量三个字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUpdate {
    pub item_name: String,
    pub price: i32,
    pub quantity: i32,
}

impl ItemUpdate {
    pub fn new(item_name: impl Into<String>, price: i32, quantity: i32) -> Self {
        Self {
            item_name: item_name.into(),
            price,
            quantity,
        }
    }

    /// 应用到已有商品上
    pub fn apply_to(&self, item: &mut Item) {
        item.item_name = self.item_name.clone();
        item.price = self.price;
        item.quantity = self.quantity;
    }
}

/// 商品查询条件
///
/// 两个条件均可选，同时存在时取交集
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSearchCond {
    /// 名称包含的文本
    pub item_name: Option<String>,
    /// 价格上限（含）
    pub max_price: Option<i32>,
}

impl ItemSearchCond {
    pub fn new(item_name: Option<String>, max_price: Option<i32>) -> Self {
        Self {
            item_name,
            max_price,
        }
    }

    /// 生效的名称条件
    ///
    /// 空串或纯空白视为未设置
    pub fn name_filter(&self) -> Option<&str> {
        self.item_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// 是否没有任何生效的条件
    pub fn is_empty(&self) -> bool {
        self.name_filter().is_none() && self.max_price.is_none()
    }

    /// 判断商品是否满足条件
    pub fn matches(&self, item: &Item) -> bool {
        let name_ok = self
            .name_filter()
            .is_none_or(|name| item.item_name.contains(name));
        let price_ok = self.max_price.is_none_or(|max| item.price <= max);
        name_ok && price_ok
    }
}
