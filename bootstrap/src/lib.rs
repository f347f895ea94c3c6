//! bootstrap - 统一服务启动骨架
//!
//! 配置加载、数据源解析、健康检查与 HTTP 服务器

mod error;
mod health;
mod infrastructure;
mod runtime;
mod starter;

pub use error::*;
pub use health::*;
pub use infrastructure::*;
pub use runtime::*;
pub use starter::*;
