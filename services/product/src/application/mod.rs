//! 应用服务

mod service;

pub use service::ProductService;
