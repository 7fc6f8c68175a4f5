//! HTTP Middleware
//!
//! 错误响应日志

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// 为 4xx/5xx 响应补一条带请求上下文的日志
///
/// 端点的错误（"ID required"、"Rule not found"、数据库错误等）都由
/// `ApiError` 渲染，消息在那里记录；这里只补充方法、路径、查询串和耗时，
/// 让一次失败的调用能和具体请求对上。未匹配的路径和 405 也会经过这里。
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let query = request.uri().query().unwrap_or_default().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(%method, %path, %query, status, elapsed_ms, "Catalog request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, %path, %query, status, elapsed_ms, "Catalog request rejected");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::ApiError;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    async fn missing_id() -> ApiError {
        ApiError::id_required()
    }

    async fn broken() -> ApiError {
        ApiError::Internal("database is locked".to_string())
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/ok", get(|| async { "OK" }))
            .route("/bad", get(missing_id))
            .route("/broken", get(broken))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        create_test_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_passes_responses_through() {
        assert_eq!(status_of("/ok").await, StatusCode::OK);
        assert_eq!(status_of("/bad").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_of("/broken").await, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
