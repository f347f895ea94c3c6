//! 启动错误

use config::ConfigError;
use datasource::DataSourceError;
use errors::AppError;
use metrics_exporter_prometheus::BuildError;
use thiserror::Error;

/// 启动阶段的致命错误，进程应直接退出
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Datasource initialization failed: {0}")]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    Infrastructure(#[from] AppError),

    #[error("Failed to install metrics recorder: {0}")]
    Metrics(#[from] BuildError),

    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
