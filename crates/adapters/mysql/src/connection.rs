//! MySQL 连接管理

use datasource::DataSourceDescriptor;
use errors::{AppError, AppResult};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use crate::config::{MySqlConfig, connect_options};

/// 创建 MySQL 连接池
///
/// 立即建立最少一个连接，数据库不可达时启动失败。
pub async fn create_pool(
    descriptor: &DataSourceDescriptor,
    config: &MySqlConfig,
) -> AppResult<MySqlPool> {
    let options = connect_options(descriptor)?;

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect_with(options)
        .await
        .map_err(|e| AppError::database(format!("Failed to create pool: {}", e)))?;

    info!(
        host = descriptor.host(),
        database = descriptor.database(),
        max_connections = config.max_connections,
        "MySQL connection pool created"
    );

    Ok(pool)
}

/// 检查数据库连接
pub async fn check_connection(pool: &MySqlPool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Database health check failed: {}", e)))?;
    Ok(())
}
