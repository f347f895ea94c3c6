//! 商品应用服务

use std::sync::Arc;

use errors::AppResult;
use metrics::counter;
use ports::Repository;
use tracing::{debug, info};

use crate::domain::Product;

/// 商品服务，对仓储的薄封装
pub struct ProductService {
    repository: Arc<dyn Repository<Product, i64>>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn Repository<Product, i64>>) -> Self {
        Self { repository }
    }

    /// 保存商品，返回带有标识的商品
    pub async fn save(&self, product: Product) -> AppResult<Product> {
        product.validate()?;

        let saved = self.repository.save(product).await?;
        counter!("products_saved_total").increment(1);

        info!(id = ?saved.id, name = %saved.name, "Product saved");
        Ok(saved)
    }

    /// 查询全部商品
    pub async fn find_all(&self) -> AppResult<Vec<Product>> {
        let products = self.repository.find_all().await?;
        debug!(count = products.len(), "Products loaded");
        Ok(products)
    }
}
