//! Taskboard Service - 服务入口
//!
//! 使用 taskboard-bootstrap 统一启动模式

use taskboard::api::http::docs::DOCS_PATH;
use taskboard::application::Stores;
use taskboard::infrastructure::persistence::migrations;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    taskboard_bootstrap::run_http("config", |infra| async move {
        let stores = match infra.postgres_pool() {
            Some(pool) => {
                infra.run_migrations(&migrations()).await?;
                Stores::postgres(pool)
            }
            None => {
                info!("Using in-memory stores");
                Stores::in_memory()
            }
        };

        info!(docs = DOCS_PATH, "API documentation enabled");
        taskboard::app(stores)
    })
    .await
}
