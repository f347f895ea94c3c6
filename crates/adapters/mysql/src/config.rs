//! MySQL 配置模块
//!
//! 连接池参数在这里配置，地址与凭据来自 [`DataSourceDescriptor`]

use std::time::Duration;

use datasource::DataSourceDescriptor;
use errors::{AppError, AppResult};
use secrecy::ExposeSecret;
use sqlx::mysql::MySqlConnectOptions;

/// MySQL 连接池配置
#[derive(Debug, Clone)]
pub struct MySqlConfig {
    /// 最小连接数
    pub min_connections: u32,
    /// 最大连接数
    pub max_connections: u32,
    /// 获取连接超时
    pub acquire_timeout: Duration,
    /// 空闲超时
    pub idle_timeout: Duration,
    /// 连接最大生命周期
    pub max_lifetime: Option<Duration>,
}

impl Default for MySqlConfig {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }
}

impl MySqlConfig {
    /// 设置连接池大小
    pub fn with_pool(mut self, min: u32, max: u32) -> Self {
        self.min_connections = min;
        self.max_connections = max;
        self
    }

    /// 设置获取连接超时
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// 设置空闲超时
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// 设置连接最大生命周期
    pub fn with_max_lifetime(mut self, lifetime: Duration) -> Self {
        self.max_lifetime = Some(lifetime);
        self
    }
}

/// 从数据源描述构建连接参数
///
/// 端口在 secret 中是文本，这里才解析为数字。
pub fn connect_options(descriptor: &DataSourceDescriptor) -> AppResult<MySqlConnectOptions> {
    let port: u16 = descriptor.port().trim().parse().map_err(|_| {
        AppError::validation(format!(
            "Invalid database port '{}' for host {}",
            descriptor.port(),
            descriptor.host()
        ))
    })?;

    Ok(MySqlConnectOptions::new()
        .host(descriptor.host())
        .port(port)
        .username(descriptor.username())
        .password(descriptor.password().expose_secret())
        .database(descriptor.database()))
}
