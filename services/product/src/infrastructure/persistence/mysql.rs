//! MySQL repository implementation

use async_trait::async_trait;
use errors::{AppError, AppResult};
use ports::Repository;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};

use crate::domain::Product;

/// 商品数据库行
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: Decimal,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
        }
    }
}

pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Product, i64> for MySqlProductRepository {
    async fn save(&self, mut product: Product) -> AppResult<Product> {
        match product.id {
            None => {
                let result = sqlx::query(
                    "INSERT INTO products (name, description, price) VALUES (?, ?, ?)",
                )
                .bind(&product.name)
                .bind(&product.description)
                .bind(product.price)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to insert product: {}", e)))?;

                let id = i64::try_from(result.last_insert_id())
                    .map_err(|_| AppError::internal("Product id out of range"))?;
                product.id = Some(id);
            }
            Some(id) => {
                sqlx::query(
                    r#"
                    INSERT INTO products (id, name, description, price)
                    VALUES (?, ?, ?, ?)
                    ON DUPLICATE KEY UPDATE
                        name = VALUES(name),
                        description = VALUES(description),
                        price = VALUES(price)
                    "#,
                )
                .bind(id)
                .bind(&product.name)
                .bind(&product.description)
                .bind(product.price)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to save product {}: {}", id, e)))?;
            }
        }

        Ok(product)
    }

    async fn find_by_id(&self, id: &i64) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query product: {}", e)))?;

        Ok(row.map(Product::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list products: {}", e)))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count products: {}", e)))?;

        Ok(count as u64)
    }

    async fn exists(&self, id: &i64) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query product: {}", e)))?;

        Ok(count > 0)
    }

    async fn delete(&self, id: &i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete product: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Product {} not found", id)));
        }
        Ok(())
    }
}
