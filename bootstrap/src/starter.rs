//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use taskboard_config::AppConfig;
use taskboard_errors::AppResult;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::health::{HealthChecker, HealthServer};
use crate::infrastructure::Infrastructure;
use crate::metrics::MetricsRecorder;
use crate::runtime::init_runtime;
use crate::shutdown::ShutdownController;

/// 运行 HTTP 服务
///
/// 1. 读取 `.env`，加载配置并初始化日志
/// 2. 安装 Prometheus recorder
/// 3. 创建基础设施资源
/// 4. 在运维端口启动健康检查服务器
/// 5. 调用 `app_builder` 构建业务路由
/// 6. 启动服务器，收到信号后 graceful shutdown
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     taskboard_bootstrap::run_http("config", |infra| async move {
///         Ok(my_router(infra.postgres_pool()))
///     })
///     .await
/// }
/// ```
pub async fn run_http<F, Fut>(config_dir: &str, app_builder: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Arc<Infrastructure>) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    // 本地开发时从 .env 读取环境变量，文件不存在则忽略
    let env_file = dotenvy::dotenv().ok();
    let config = AppConfig::load(config_dir)?;
    init_runtime(&config)?;

    if let Some(path) = env_file {
        info!(path = %path.display(), "Loaded environment file");
    }

    info!("Starting {} service", config.app_name);

    let metrics = match MetricsRecorder::install() {
        Ok(recorder) => Some(Arc::new(recorder)),
        Err(e) => {
            warn!(error = %e, "Metrics disabled");
            None
        }
    };

    let infra = Arc::new(Infrastructure::from_config(config.clone()).await?);

    let shutdown = ShutdownController::new();
    let signal_handle = shutdown.trigger_on_signal();

    let checker = Arc::new(HealthChecker::new(infra.postgres_pool()));
    let health_server = HealthServer::new(checker, metrics, config.server.health_port());
    let health_shutdown = shutdown.wait();
    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.serve(health_shutdown).await {
            error!("Health server error: {}", e);
        }
    });

    let app = app_builder(infra.clone())
        .await?
        .layer(TraceLayer::new_for_http());

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.wait())
        .await?;

    shutdown.shutdown();
    if let Err(e) = health_handle.await {
        error!("Health server task failed: {}", e);
    }
    signal_handle.abort();

    info!("Service stopped");

    Ok(())
}
