//! 基础设施错误处理模块
//!
//! 定义配置、数据库连接、迁移等基础设施层的错误类型，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 基础设施错误类型
#[derive(Debug, Error)]
pub enum InfraError {
    // ==================== 数据库错误 ====================
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("数据库迁移失败: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    // ==================== 配置错误 ====================
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, InfraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_contains_context() {
        let err = InfraError::Config(config::ConfigError::NotFound("server.port".into()));
        assert!(err.to_string().starts_with("配置错误"));
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_from_sqlx_error() {
        let err: InfraError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, InfraError::Database(sqlx::Error::PoolTimedOut)));
    }
}
