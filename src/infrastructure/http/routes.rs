//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping     GET                       健康检查
//! - /api/rules    GET POST PUT DELETE OPTIONS  规则、分类、游戏
//! - /             同 /api/rules，兼容直接挂载为函数 URL 的部署

use axum::{
    routing::{get, MethodRouter},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", catalog_endpoint())
        .nest("/api", api_routes())
        .fallback(handlers::fallback)
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping).options(handlers::preflight))
        .route("/rules", catalog_endpoint())
}

/// 规则端点，按 HTTP 方法分派
fn catalog_endpoint() -> MethodRouter<Arc<AppState>> {
    get(handlers::list_resources)
        .post(handlers::create_resource)
        .put(handlers::update_resource)
        .delete(handlers::delete_resource)
        .options(handlers::preflight)
        .fallback(handlers::method_not_allowed)
}
