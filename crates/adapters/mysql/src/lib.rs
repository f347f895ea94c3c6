//! adapter-mysql - MySQL 适配器
//!
//! 使用启动时解析出的 [`datasource::DataSourceDescriptor`] 建立连接池

mod config;
mod connection;
mod migration;

pub use config::*;
pub use connection::*;
pub use migration::*;
