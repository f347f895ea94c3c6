//! 商品实体

use errors::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 价格列 `DECIMAL(19, 2)` 的小数位数
pub const PRICE_SCALE: u32 = 2;

/// 商品
///
/// `id` 为空表示尚未持久化，由数据库在插入时分配。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 业务校验：名称不能为空，价格不能为负，且不超过两位小数
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Product name must not be blank"));
        }
        if self.price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Product price must not be negative: {}",
                self.price
            )));
        }
        if self.price.normalize().scale() > PRICE_SCALE {
            return Err(AppError::validation(format!(
                "Product price must have at most {} decimal places: {}",
                PRICE_SCALE, self.price
            )));
        }
        Ok(())
    }
}
