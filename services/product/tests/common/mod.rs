//! 测试用内存仓储

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use errors::{AppError, AppResult};
use ports::Repository;
use product_service::application::ProductService;
use product_service::domain::Product;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryProductRepository {
    rows: Mutex<BTreeMap<i64, Product>>,
    next_id: AtomicI64,
}

#[async_trait]
impl Repository<Product, i64> for InMemoryProductRepository {
    async fn save(&self, mut product: Product) -> AppResult<Product> {
        let id = match product.id {
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
        };
        product.id = Some(id);
        self.rows.lock().await.insert(id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &i64) -> AppResult<Option<Product>> {
        Ok(self.rows.lock().await.get(id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        Ok(self.rows.lock().await.values().cloned().collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.lock().await.len() as u64)
    }

    async fn exists(&self, id: &i64) -> AppResult<bool> {
        Ok(self.rows.lock().await.contains_key(id))
    }

    async fn delete(&self, id: &i64) -> AppResult<()> {
        self.rows
            .lock()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))
    }
}

pub fn service() -> (Arc<ProductService>, Arc<InMemoryProductRepository>) {
    let repository = Arc::new(InMemoryProductRepository::default());
    let service = Arc::new(ProductService::new(repository.clone()));
    (service, repository)
}
