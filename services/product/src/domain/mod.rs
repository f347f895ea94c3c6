//! 领域模型

mod product;

pub use product::Product;
