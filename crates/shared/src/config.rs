//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::observability::ObservabilityConfig;

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
    /// 启动时是否执行迁移
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: 600,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// 是否为内存数据库
    ///
    /// 内存库的数据只存在于单个连接中，连接池需要固定为一个常驻连接
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// 仓储实现类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    /// 进程内存储，重启即丢失
    Memory,
    /// SQL 数据库存储
    #[default]
    Sql,
}

/// 仓储配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RepositoryConfig {
    pub kind: RepositoryKind,
}

/// 初始数据配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SeedConfig {
    /// 显式开关；未设置时仅在 local 环境写入初始数据
    pub enabled: Option<bool>,
}

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 允许跨域的来源，逗号分隔；"*" 表示全部
    pub cors_origins: String,
    /// 单个请求的超时时间
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: "http://localhost:3000,http://localhost:5173".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub repository: RepositoryConfig,
    pub seed: SeedConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. .env 文件（如存在，写入进程环境变量）
    /// 2. config/default.toml（默认配置）
    /// 3. config/{environment}.toml（环境特定配置）
    /// 4. config/{service_name}.toml（服务特定配置）
    /// 5. 环境变量（ITEM_ 前缀，双下划线分隔层级，如 ITEM_DATABASE__URL -> database.url）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        // .env 不存在是正常情况
        let _ = dotenvy::dotenv();

        let env = current_environment();
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        Self::load_from(Path::new(&config_dir), &env, service_name)
    }

    /// 加载配置，失败时回退到默认配置
    ///
    /// production 环境不回退：配置写错时直接报错，不能悄悄切到内存库
    pub fn load_or_default(service_name: &str) -> crate::error::Result<Self> {
        let loaded = Self::load(service_name);
        Self::or_default(loaded, &current_environment(), service_name)
    }

    fn or_default(
        loaded: Result<Self, ConfigError>,
        environment: &str,
        service_name: &str,
    ) -> crate::error::Result<Self> {
        match loaded {
            Ok(config) => Ok(config),
            Err(e) if environment == "production" => Err(e.into()),
            Err(e) => {
                // 日志尚未初始化，只能打到 stderr
                eprintln!("Failed to load config, using defaults: {e}");
                Ok(Self {
                    service_name: service_name.to_string(),
                    environment: environment.to_string(),
                    ..Default::default()
                })
            }
        }
    }

    /// 从指定目录加载配置
    pub fn load_from(
        config_dir: &Path,
        environment: &str,
        service_name: &str,
    ) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", environment)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", environment))).required(false),
            )
            .add_source(
                File::from(config_dir.join(format!("{}.toml", service_name))).required(false),
            )
            .add_source(
                Environment::with_prefix("ITEM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否需要写入初始数据
    pub fn should_seed(&self) -> bool {
        self.seed.enabled.unwrap_or(self.environment == "local")
    }
}

/// 当前环境，由 ITEM_ENV 指定
fn current_environment() -> String {
    std::env::var("ITEM_ENV").unwrap_or_else(|_| "development".to_string())
}
