//! Middleware 定义
//!
//! Middleware 只观察分发过程，不能修改消息或结果

use std::time::Duration;

use metrics::{counter, histogram};
use taskboard_errors::AppError;

use crate::MessageKind;

/// 被分发的消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageMeta {
    pub kind: MessageKind,
    pub name: &'static str,
}

/// 分发结果摘要
#[derive(Debug)]
pub struct DispatchOutcome<'a> {
    pub elapsed: Duration,
    pub error: Option<&'a AppError>,
}

impl DispatchOutcome<'_> {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// 结果标签：ok / client_error / server_error
    pub fn label(&self) -> &'static str {
        match self.error {
            None => "ok",
            Some(e) if e.status_code() >= 500 => "server_error",
            Some(_) => "client_error",
        }
    }
}

/// Dispatch Middleware trait
pub trait DispatchMiddleware: Send + Sync {
    fn before(&self, _message: &MessageMeta) {}

    fn after(&self, message: &MessageMeta, outcome: &DispatchOutcome<'_>);
}

/// 日志中间件
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMiddleware;

impl DispatchMiddleware for LoggingMiddleware {
    fn before(&self, message: &MessageMeta) {
        tracing::debug!(kind = %message.kind, message = message.name, "Dispatching message");
    }

    fn after(&self, message: &MessageMeta, outcome: &DispatchOutcome<'_>) {
        let elapsed_ms = outcome.elapsed.as_millis() as u64;
        match outcome.error {
            None => tracing::debug!(
                kind = %message.kind,
                message = message.name,
                elapsed_ms,
                "Message handled"
            ),
            Some(e) if e.status_code() >= 500 => tracing::error!(
                kind = %message.kind,
                message = message.name,
                elapsed_ms,
                error = %e,
                "Message failed"
            ),
            Some(e) => tracing::warn!(
                kind = %message.kind,
                message = message.name,
                elapsed_ms,
                error = %e,
                "Message rejected"
            ),
        }
    }
}

/// 指标中间件
///
/// - `cqrs_dispatch_total{kind, message, outcome}`
/// - `cqrs_dispatch_duration_ms{kind, message}`
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsMiddleware;

impl DispatchMiddleware for MetricsMiddleware {
    fn after(&self, message: &MessageMeta, outcome: &DispatchOutcome<'_>) {
        counter!(
            "cqrs_dispatch_total",
            "kind" => message.kind.as_str(),
            "message" => message.name,
            "outcome" => outcome.label()
        )
        .increment(1);

        histogram!(
            "cqrs_dispatch_duration_ms",
            "kind" => message.kind.as_str(),
            "message" => message.name
        )
        .record(outcome.elapsed.as_secs_f64() * 1000.0);
    }
}
