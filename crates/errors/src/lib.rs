//! taskboard-errors - 统一错误处理
//!
//! 基于 RFC 7807 Problem Details 规范

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 字段级校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed: {}", join_field_errors(.0))]
    ValidationFailed(Vec<FieldError>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    /// 没有为该消息注册处理器（配置缺陷）
    #[error("No handler registered for message: {0}")]
    UnregisteredMessage(String),

    /// 同一消息注册了多个处理器（配置缺陷）
    #[error("Handler already registered for message: {0}")]
    DuplicateHandler(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn validation_failed(errors: Vec<FieldError>) -> Self {
        Self::ValidationFailed(errors)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn unregistered_message(name: impl Into<String>) -> Self {
        Self::UnregisteredMessage(name.into())
    }

    pub fn duplicate_handler(name: impl Into<String>) -> Self {
        Self::DuplicateHandler(name.into())
    }

    /// 是否为配置缺陷（应在启动阶段暴露）
    pub fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            Self::UnregisteredMessage(_) | Self::DuplicateHandler(_)
        )
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::ValidationFailed(_) => 400,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
            Self::Database(_) => 500,
            Self::UnregisteredMessage(_) => 500,
            Self::DuplicateHandler(_) => 500,
        }
    }

    /// 转换为 Problem Details
    pub fn to_problem_details(&self) -> ProblemDetails {
        let errors = match self {
            Self::ValidationFailed(errors) => Some(errors.clone()),
            _ => None,
        };

        ProblemDetails {
            r#type: self.problem_type(),
            title: self.problem_title(),
            status: self.status_code(),
            detail: self.to_string(),
            instance: None,
            errors,
        }
    }

    fn problem_type(&self) -> String {
        match self {
            Self::NotFound(_) => "https://taskboard.dev/problems/not-found".to_string(),
            Self::Validation(_) | Self::ValidationFailed(_) => {
                "https://taskboard.dev/problems/validation".to_string()
            }
            Self::Conflict(_) => "https://taskboard.dev/problems/conflict".to_string(),
            Self::Internal(_) => "https://taskboard.dev/problems/internal".to_string(),
            Self::Database(_) => "https://taskboard.dev/problems/database".to_string(),
            Self::UnregisteredMessage(_) | Self::DuplicateHandler(_) => {
                "https://taskboard.dev/problems/configuration".to_string()
            }
        }
    }

    fn problem_title(&self) -> String {
        match self {
            Self::NotFound(_) => "Resource Not Found".to_string(),
            Self::Validation(_) | Self::ValidationFailed(_) => "Validation Error".to_string(),
            Self::Conflict(_) => "Conflict".to_string(),
            Self::Internal(_) => "Internal Server Error".to_string(),
            Self::Database(_) => "Database Error".to_string(),
            Self::UnregisteredMessage(_) | Self::DuplicateHandler(_) => {
                "Configuration Error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let problem = self.to_problem_details();
        let status =
            StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // 服务端错误不向调用方暴露内部细节
        let problem = if status.is_server_error() {
            ProblemDetails {
                detail: problem.title.clone(),
                ..problem
            }
        } else {
            problem
        };

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            axum::Json(problem),
        )
            .into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// RFC 7807 Problem Details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
