//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use itemservice_shared::database::Database;

use crate::repository::ItemRepositoryTrait;
use crate::service::{DynItemService, ItemService};

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    /// 商品服务
    pub item_service: Arc<DynItemService>,
    /// 数据库连接（内存仓储模式下为空）
    pub database: Option<Database>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(repository: Arc<dyn ItemRepositoryTrait>, database: Option<Database>) -> Self {
        Self {
            item_service: Arc::new(ItemService::new(repository)),
            database,
        }
    }
}
