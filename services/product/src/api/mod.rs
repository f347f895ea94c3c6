//! HTTP API

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use errors::AppResult;

use crate::application::ProductService;
use crate::domain::Product;

/// 商品路由
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/api/v1/products", post(create_product).get(list_products))
        .with_state(service)
}

async fn create_product(
    State(service): State<Arc<ProductService>>,
    Json(product): Json<Product>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let saved = service.save(product).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn list_products(
    State(service): State<Arc<ProductService>>,
) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(service.find_all().await?))
}
