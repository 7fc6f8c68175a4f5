//! HTTP Error Handling
//!
//! 所有错误统一渲染为 `{"error": "..."}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 400，缺少 id 或 type 无法识别
    BadRequest(String),
    /// 更新/删除的目标不存在，沿用既有约定返回 500
    MissingResource(String),
    /// 404，没有匹配的路由
    NoRoute,
    /// 405
    MethodNotAllowed,
    /// 500，其余所有错误，消息原样返回
    Internal(String),
}

impl ApiError {
    pub fn id_required() -> Self {
        ApiError::BadRequest("ID required".to_string())
    }

    pub fn invalid_type() -> Self {
        ApiError::BadRequest("Invalid type".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NoRoute => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::MissingResource(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::MissingResource(msg) | ApiError::Internal(msg) => {
                msg.as_str()
            }
            ApiError::NoRoute => "Not found",
            ApiError::MethodNotAllowed => "Method not allowed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        match &self {
            ApiError::BadRequest(_) => {
                tracing::warn!(status = status.as_u16(), error = %message, "Bad request");
            }
            ApiError::MissingResource(_) => {
                tracing::warn!(status = status.as_u16(), error = %message, "Resource not found");
            }
            ApiError::NoRoute | ApiError::MethodNotAllowed => {
                tracing::debug!(status = status.as_u16(), "Request not routed");
            }
            ApiError::Internal(_) => {
                tracing::error!(status = status.as_u16(), error = %message, "Internal server error");
            }
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, id } => {
                tracing::debug!(resource_type, id, "Write target missing");
                ApiError::MissingResource(format!("{} not found", resource_type))
            }
            ApplicationError::RepositoryError(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_server_error_status() {
        let err: ApiError = ApplicationError::not_found("Rule", 1).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Rule not found");
    }

    #[test]
    fn test_statuses() {
        assert_eq!(ApiError::id_required().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::invalid_type().message(), "Invalid type");
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::NoRoute.status(), StatusCode::NOT_FOUND);
    }
}
