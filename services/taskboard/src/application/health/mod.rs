//! API 状态查询

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use taskboard_cqrs_core::{Query, QueryHandler};
use taskboard_errors::AppResult;
use tracing::debug;
use utoipa::ToSchema;

/// 获取 API 状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetHealthQuery;

impl Query for GetHealthQuery {
    const NAME: &'static str = "health.get";
    type Result = HealthReport;
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: f64,
    pub message: String,
}

pub struct GetHealthHandler {
    started_at: Instant,
    message: String,
}

impl GetHealthHandler {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            started_at: Instant::now(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl QueryHandler<GetHealthQuery> for GetHealthHandler {
    async fn handle(&self, _query: GetHealthQuery) -> AppResult<HealthReport> {
        debug!("Handling GetHealthQuery");

        Ok(HealthReport {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            uptime_seconds: self.started_at.elapsed().as_secs_f64(),
            message: self.message.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_report() {
        let handler = GetHealthHandler::new("Taskboard API");
        let report = handler.handle(GetHealthQuery).await.unwrap();

        assert_eq!(report.status, "ok");
        assert_eq!(report.message, "Taskboard API");
        assert!(report.uptime_seconds >= 0.0);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("uptimeSeconds").is_some());
    }
}
