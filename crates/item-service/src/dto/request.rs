//! 请求 DTO 定义

use serde::Deserialize;
use validator::Validate;

use crate::error::ItemError;
use crate::models::{ITEM_NAME_MAX_CHARS, ItemSearchCond, ItemUpdate, NewItem};

/// 新增商品请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = ITEM_NAME_MAX_CHARS, message = "商品名称长度必须在1-10个字符之间"))]
    pub item_name: String,
    #[validate(range(min = 0, message = "价格不能为负数"))]
    pub price: i32,
    #[validate(range(min = 0, message = "数量不能为负数"))]
    pub quantity: i32,
}

impl From<CreateItemRequest> for NewItem {
    fn from(req: CreateItemRequest) -> Self {
        NewItem::new(req.item_name, req.price, req.quantity)
    }
}

/// 修改商品请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = ITEM_NAME_MAX_CHARS, message = "商品名称长度必须在1-10个字符之间"))]
    pub item_name: String,
    #[validate(range(min = 0, message = "价格不能为负数"))]
    pub price: i32,
    #[validate(range(min = 0, message = "数量不能为负数"))]
    pub quantity: i32,
}

impl From<UpdateItemRequest> for ItemUpdate {
    fn from(req: UpdateItemRequest) -> Self {
        ItemUpdate::new(req.item_name, req.price, req.quantity)
    }
}

/// 商品列表查询参数
///
/// 搜索表单会提交空的 maxPrice，这里先按字符串接收再解析
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSearchParams {
    pub item_name: Option<String>,
    pub max_price: Option<String>,
}

impl TryFrom<ItemSearchParams> for ItemSearchCond {
    type Error = ItemError;

    fn try_from(params: ItemSearchParams) -> Result<Self, Self::Error> {
        let max_price = match params.max_price.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i32>().map_err(|_| {
                ItemError::Validation(format!("maxPrice 必须是整数: {}", raw))
            })?),
        };

        Ok(ItemSearchCond::new(params.item_name, max_price))
    }
}
