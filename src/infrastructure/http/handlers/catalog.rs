//! Catalog HTTP Handlers
//!
//! 规则、分类和游戏共用同一个端点，按方法和 `type` 分派

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::{
    CreateGame, CreateRule, DeleteGame, DeleteRule, ListCategories, ListGames, ListRules,
    UpdateGame, UpdateRule,
};
use crate::infrastructure::http::dto::{
    CatalogQuery, CategoryResponse, CreateRequest, DeleteRequest, GameResponse, ListRequest,
    RuleResponse, SuccessResponse, UpdateRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 预检响应允许的方法
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// 预检缓存时间（秒）
pub const PREFLIGHT_MAX_AGE: &str = "86400";

/// GET：列出分类、游戏或规则
pub async fn list_resources(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let query = CatalogQuery::from_params(params);
    let response = match ListRequest::from_query(&query) {
        ListRequest::Categories => {
            let categories = state.list_categories_handler.handle(ListCategories).await?;
            Json(
                categories
                    .into_iter()
                    .map(CategoryResponse::from)
                    .collect::<Vec<_>>(),
            )
            .into_response()
        }
        ListRequest::Games => {
            let games = state.list_games_handler.handle(ListGames).await?;
            Json(games.into_iter().map(GameResponse::from).collect::<Vec<_>>()).into_response()
        }
        ListRequest::Rules { category } => {
            let rules = state
                .list_rules_handler
                .handle(ListRules { category })
                .await?;
            Json(rules.into_iter().map(RuleResponse::from).collect::<Vec<_>>()).into_response()
        }
    };

    Ok(response)
}

/// POST：创建规则或游戏，返回 201
pub async fn create_resource(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let created = match CreateRequest::from_body(&body)? {
        CreateRequest::Rule(rule) => {
            let rule = state.create_rule_handler.handle(CreateRule { rule }).await?;
            Json(RuleResponse::from(rule)).into_response()
        }
        CreateRequest::Game(game) => {
            let game = state.create_game_handler.handle(CreateGame { game }).await?;
            Json(GameResponse::from(game)).into_response()
        }
    };

    Ok((StatusCode::CREATED, created).into_response())
}

/// PUT：按 id 整体更新规则或游戏
pub async fn update_resource(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let updated = match UpdateRequest::from_body(&body)? {
        UpdateRequest::Rule { id, changes } => {
            let rule = state
                .update_rule_handler
                .handle(UpdateRule { id, changes })
                .await?;
            Json(RuleResponse::from(rule)).into_response()
        }
        UpdateRequest::Game { id, changes } => {
            let game = state
                .update_game_handler
                .handle(UpdateGame { id, changes })
                .await?;
            Json(GameResponse::from(game)).into_response()
        }
    };

    Ok(updated)
}

/// DELETE：按 id 删除规则或游戏
pub async fn delete_resource(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SuccessResponse>, ApiError> {
    match DeleteRequest::from_query(&CatalogQuery::from_params(params))? {
        DeleteRequest::Rule { id } => state.delete_rule_handler.handle(DeleteRule { id }).await?,
        DeleteRequest::Game { id } => state.delete_game_handler.handle(DeleteGame { id }).await?,
    }

    Ok(Json(SuccessResponse::ok()))
}

/// OPTIONS：CORS 预检，空响应体
///
/// `Access-Control-Allow-Origin` 由 `build_router` 统一添加
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (header::ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE),
        ],
    )
}

/// 端点上其它方法
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// 未匹配路由：OPTIONS 在任意路径上都按预检处理
pub async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        preflight().await.into_response()
    } else {
        ApiError::NoRoute.into_response()
    }
}
