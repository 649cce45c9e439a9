//! 商品服务
//!
//! 提供商品目录的查询、新增、修改等 REST API。
//!
//! ## 核心功能
//!
//! - **商品管理**：商品的新增、修改、详情查询
//! - **条件搜索**：按名称包含关系和价格上限组合查询
//! - **可切换存储**：内存仓储与 SQL 仓储共用同一 trait，启动时按配置选择
//! - **初始数据**：local 环境自动写入示例商品
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `repository`: 仓储层
//! - `service`: 业务服务层
//! - `seed`: 初始数据
//! - `dto`: 请求和响应的数据传输对象
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据访问：SQLx (SQLite)
//! - 数据验证：validator
//! - 序列化：serde (camelCase)

pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;

pub use error::{ItemError, Result};
pub use models::{Item, ItemSearchCond, ItemUpdate, NewItem};
pub use repository::{ItemRepositoryTrait, MemoryItemRepository, SqlItemRepository};
pub use service::{DynItemService, ItemService};

/// 商品表迁移，编译期嵌入
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
