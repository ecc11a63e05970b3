//! HTTP 接口
//!
//! 请求转换为 Command/Query 交给 Bus，错误由 `AppError` 转为 Problem Details

pub mod categories;
pub mod docs;
pub mod tags;
pub mod todos;
pub mod validation;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use taskboard_cqrs_core::{QueryBus, RegistryCommandBus, RegistryQueryBus};
use taskboard_errors::AppResult;
use utoipa::ToSchema;

use crate::application::health::{GetHealthQuery, HealthReport};

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub commands: Arc<RegistryCommandBus>,
    pub queries: Arc<RegistryQueryBus>,
}

impl AppState {
    pub fn new(commands: RegistryCommandBus, queries: RegistryQueryBus) -> Self {
        Self {
            commands: Arc::new(commands),
            queries: Arc::new(queries),
        }
    }
}

/// 删除成功的响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub message: String,
}

impl DeletedResponse {
    pub fn new(entity: &str, id: i64) -> Self {
        Self {
            message: format!("{entity} {id} deleted successfully"),
        }
    }
}

/// 全部业务路由，挂载在 `/api` 下，文档在 `/api/docs`
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .merge(todos::routes())
        .merge(tags::routes())
        .merge(categories::routes());

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .merge(docs::swagger_ui())
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "API status", body = HealthReport))
)]
pub(crate) async fn health(State(state): State<AppState>) -> AppResult<Json<HealthReport>> {
    Ok(Json(state.queries.dispatch(GetHealthQuery).await?))
}
