//! 基础设施资源管理
//!
//! 启动时解析数据源并创建连接池

use std::time::Duration;

use adapter_mysql::{MySqlConfig, create_pool};
use adapter_secrets::{AwsSecretsManagerConnector, SecretStoreConfig, SecretStoreConfigBuilder};
use config::{AppConfig, DatabaseConfig};
use datasource::{DataSourceDescriptor, DataSourceInitializer};
use sqlx::MySqlPool;
use tracing::info;

use crate::error::BootstrapError;

/// 基础设施资源容器
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// 启动时解析出的数据源
    descriptor: DataSourceDescriptor,
    /// MySQL 连接池
    pool: MySqlPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    ///
    /// secret 不可用或数据库不可达时直接失败，不会重试，也不会回退到默认数据源。
    pub async fn from_config(config: AppConfig) -> Result<Self, BootstrapError> {
        // 1. 从 Secrets Manager 解析数据源
        let initializer = DataSourceInitializer::new(
            AwsSecretsManagerConnector,
            secret_store_config(&config),
            config.secret.name.clone(),
        );
        let descriptor = initializer.resolve().await?;

        // 2. 创建 MySQL 连接池
        let pool = create_pool(&descriptor, &mysql_config(&config.database)).await?;

        info!(
            url = descriptor.url(),
            driver = descriptor.driver().name(),
            "Infrastructure initialized"
        );

        Ok(Self {
            config,
            descriptor,
            pool,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn descriptor(&self) -> &DataSourceDescriptor {
        &self.descriptor
    }

    /// 获取连接池（内部为 Arc，克隆开销很小）
    pub fn pool(&self) -> MySqlPool {
        self.pool.clone()
    }
}

/// 应用配置 → secret store 客户端配置
pub fn secret_store_config(config: &AppConfig) -> SecretStoreConfig {
    let mut builder = SecretStoreConfigBuilder::new(config.aws.region.clone())
        .with_access_key(config.aws.access_key.clone())
        .with_secret_key(config.aws.secret_key.clone())
        .with_connect_timeout(config.secret.connect_timeout_secs)
        .with_request_timeout(config.secret.timeout_secs);

    if let Some(endpoint) = &config.aws.endpoint_url {
        builder = builder.with_endpoint_url(endpoint.clone());
    }

    builder.build()
}

/// 应用配置 → 连接池配置
pub fn mysql_config(database: &DatabaseConfig) -> MySqlConfig {
    MySqlConfig::default()
        .with_pool(database.min_connections, database.max_connections)
        .with_acquire_timeout(Duration::from_secs(database.acquire_timeout_secs))
        .with_idle_timeout(Duration::from_secs(database.idle_timeout_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::{ExposeSecret, Secret};

    #[test]
    fn test_secret_store_config_mapping() {
        let mut config: AppConfig = serde_json::from_str("{}").unwrap();
        config.aws.region = "eu-west-1".to_string();
        config.aws.access_key = Some(Secret::new("AKIAEXAMPLE".to_string()));
        config.aws.endpoint_url = Some("http://localhost:4566".to_string());
        config.secret.timeout_secs = 7;
        config.secret.connect_timeout_secs = 2;

        let store = secret_store_config(&config);

        assert_eq!(store.effective_region(), "eu-west-1");
        assert_eq!(
            store.access_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("AKIAEXAMPLE")
        );
        assert!(store.secret_key.is_none());
        assert_eq!(store.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert_eq!(store.request_timeout(), Duration::from_secs(7));
        assert_eq!(store.connect_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_mysql_config_mapping() {
        let database = DatabaseConfig {
            max_connections: 25,
            min_connections: 3,
            acquire_timeout_secs: 4,
            idle_timeout_secs: 120,
            run_migrations: false,
        };

        let mysql = mysql_config(&database);

        assert_eq!(mysql.max_connections, 25);
        assert_eq!(mysql.min_connections, 3);
        assert_eq!(mysql.acquire_timeout, Duration::from_secs(4));
        assert_eq!(mysql.idle_timeout, Duration::from_secs(120));
    }
}
