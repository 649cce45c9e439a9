//! 业务服务层

mod item_service;

pub use item_service::ItemService;

use crate::repository::ItemRepositoryTrait;

/// 运行时按配置选择仓储实现的服务类型
pub type DynItemService = ItemService<dyn ItemRepositoryTrait>;
