//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use adapter_mysql::{Migration, run_migrations};
use axum::Router;
use config::AppConfig;
use errors::AppResult;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::BootstrapError;
use crate::health::{HealthChecker, health_routes};
use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 这是服务的统一入口点。它负责：
/// 1. 加载配置
/// 2. 初始化运行时（日志）与 metrics recorder
/// 3. 从 Secrets Manager 解析数据源并创建连接池，失败则启动中止
/// 4. 应用 schema 迁移
/// 5. 调用用户提供的闭包构建业务路由
/// 6. 挂载健康检查与指标端点，启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// use bootstrap::run_http;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_http("config", MIGRATIONS, |infra| async move {
///         Ok(my_routes(infra.pool()))
///     })
///     .await?;
///     Ok(())
/// }
/// ```
pub async fn run_http<F, Fut>(
    config_dir: &str,
    migrations: &[Migration],
    router_builder: F,
) -> Result<(), BootstrapError>
where
    F: FnOnce(Arc<Infrastructure>) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    // 1. 加载配置
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);
    let metrics = telemetry::init_metrics()?;

    info!("Starting {} service", config.app_name);

    // 3. 解析数据源，创建基础设施
    let infra = match Infrastructure::from_config(config.clone()).await {
        Ok(infra) => Arc::new(infra),
        Err(e) => {
            error!(error = %e, "Startup aborted");
            return Err(e);
        }
    };

    // 4. 应用迁移
    if config.database.run_migrations {
        run_migrations(&infra.pool(), migrations).await?;
    }

    // 5. 构建业务路由
    let health_checker = Arc::new(HealthChecker::new(Some(infra.pool())));
    let app = router_builder(infra.clone())
        .await?
        .merge(health_routes(health_checker, Some(metrics)))
        .layer(TraceLayer::new_for_http());

    // 6. 启动服务器
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    infra.pool().close().await;
    info!("Server shutdown complete");

    Ok(())
}
