//! product-service - 商品目录服务

use std::sync::Arc;

use bootstrap::run_http;
use tracing::info;

use product_service::api;
use product_service::application::ProductService;
use product_service::infrastructure::persistence::{MySqlProductRepository, PRODUCT_MIGRATIONS};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    run_http("config", PRODUCT_MIGRATIONS, |infra| async move {
        info!("Initializing product service...");

        let repository = Arc::new(MySqlProductRepository::new(infra.pool()));
        let service = Arc::new(ProductService::new(repository));

        Ok(api::routes(service))
    })
    .await?;

    Ok(())
}
