//! datasource - 启动时从 secret store 解析数据源
//!
//! 读取 secret → 解析为 [`SecretPayload`] → 生成 [`DataSourceDescriptor`]

mod descriptor;
mod error;
mod initializer;
mod payload;

pub use descriptor::*;
pub use error::*;
pub use initializer::*;
pub use payload::*;
