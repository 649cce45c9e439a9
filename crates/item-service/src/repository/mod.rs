//! 数据库仓储层
//!
//! 提供商品的数据访问接口，封装存储细节。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - 同一 trait 下提供内存和 SQL 两种实现，启动时按配置选择
//! - 定义 trait 接口以支持 mock 测试

mod memory_repo;
mod sql_repo;
mod traits;

use std::sync::Arc;
use std::time::Instant;

use itemservice_shared::config::RepositoryKind;
use itemservice_shared::observability::metrics;
use sqlx::SqlitePool;

pub use memory_repo::MemoryItemRepository;
pub use sql_repo::SqlItemRepository;
pub use traits::*;

/// 按配置创建仓储
///
/// 内存仓储不需要连接池
pub fn build_repository(
    kind: RepositoryKind,
    pool: Option<SqlitePool>,
) -> crate::error::Result<Arc<dyn ItemRepositoryTrait>> {
    match (kind, pool) {
        (RepositoryKind::Memory, _) => Ok(Arc::new(MemoryItemRepository::new())),
        (RepositoryKind::Sql, Some(pool)) => Ok(Arc::new(SqlItemRepository::new(pool))),
        (RepositoryKind::Sql, None) => Err(crate::error::ItemError::Internal(
            "SQL 仓储需要数据库连接池".to_string(),
        )),
    }
}

/// 记录一次仓储操作的耗时和结果
fn observe<T>(
    backend: &'static str,
    operation: &'static str,
    start: Instant,
    result: &crate::error::Result<T>,
) {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    metrics::record_repository_operation(
        backend,
        operation,
        outcome,
        start.elapsed().as_secs_f64(),
    );
}
