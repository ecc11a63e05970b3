//! Metrics 模块
//!
//! 提供 Prometheus metrics 导出

use metrics::gauge;
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use taskboard_telemetry::{TelemetryError, init_metrics};

/// Metrics 记录器
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// 安装全局 Prometheus recorder
    pub fn install() -> Result<Self, TelemetryError> {
        Ok(Self {
            handle: init_metrics()?,
        })
    }

    /// 获取 Prometheus 格式的 metrics
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// 记录 PostgreSQL 连接池指标
pub fn record_postgres_pool_metrics(pool: &PgPool) {
    let size = pool.size();
    let idle = pool.num_idle() as u32;
    let active = size.saturating_sub(idle);

    gauge!("postgres_pool_size").set(size as f64);
    gauge!("postgres_pool_idle").set(idle as f64);
    gauge!("postgres_pool_active").set(active as f64);

    let utilization = if size > 0 {
        (active as f64 / size as f64) * 100.0
    } else {
        0.0
    };
    gauge!("postgres_pool_utilization").set(utilization);
}
