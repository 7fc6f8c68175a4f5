//! Gateway Event Adapter
//!
//! 把 serverless 网关风格的事件转换成 HTTP 请求交给同一个 Router 处理，
//! 再把响应转换回事件格式

use std::collections::{BTreeMap, HashMap};

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header, Method, Request};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower::util::ServiceExt;

/// 事件转发到的路径
const ENDPOINT_PATH: &str = "/api/rules";

/// 响应体大小上限
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// 网关适配错误
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid event: {0}")]
    InvalidEvent(#[from] serde_json::Error),

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Failed to build request: {0}")]
    InvalidRequest(#[from] http::Error),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// 网关请求事件
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path_params: Option<HashMap<String, String>>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

/// 网关响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl GatewayEvent {
    /// 转换为 HTTP 请求，缺省方法为 GET
    pub fn into_request(self) -> Result<Request<Body>, GatewayError> {
        let method_name = self
            .http_method
            .as_deref()
            .unwrap_or("GET")
            .to_ascii_uppercase();
        let method = Method::from_bytes(method_name.as_bytes())
            .map_err(|_| GatewayError::InvalidMethod(method_name.clone()))?;

        if let Some(path_params) = &self.path_params {
            tracing::debug!(?path_params, "Gateway path params ignored by catalog endpoint");
        }

        let mut uri = ENDPOINT_PATH.to_string();
        if let Some(params) = self.query_string_parameters.filter(|p| !p.is_empty()) {
            // 排序后拼接，保证相同事件得到相同 URI
            let mut pairs: Vec<_> = params.into_iter().collect();
            pairs.sort();
            let query = pairs
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            uri.push('?');
            uri.push_str(&query);
        }

        // 缺少 body 的事件按 `{}` 处理，空字符串则原样交给端点
        let body = self.body.unwrap_or_else(|| "{}".to_string());

        Ok(Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))?)
    }
}

/// 通过 Router 处理一个网关事件
pub async fn invoke(router: Router, event: GatewayEvent) -> Result<GatewayResponse, GatewayError> {
    let request = event.into_request()?;
    let response = match router.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    let status_code = response.status().as_u16();
    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in response.headers() {
        let Ok(value) = value.to_str() else {
            continue;
        };
        headers
            .entry(canonical_header_name(name.as_str()))
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| GatewayError::Body(e.to_string()))?;

    Ok(GatewayResponse {
        status_code,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
        is_base64_encoded: false,
    })
}

/// 处理 JSON 格式的事件，返回 JSON 格式的响应
pub async fn invoke_json(router: Router, event: &str) -> Result<String, GatewayError> {
    let event: GatewayEvent = serde_json::from_str(event)?;
    let response = invoke(router, event).await?;
    Ok(serde_json::to_string(&response)?)
}

/// `content-type` -> `Content-Type`
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::{build_router, AppState};
    use crate::infrastructure::persistence::sqlite::{memory_pool, seed_category};
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn router() -> Router {
        let pool = memory_pool().await;
        seed_category(&pool, "safety", 0).await;
        build_router(Arc::new(AppState::from_pool(pool)))
    }

    fn event(value: Value) -> GatewayEvent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_canonical_header_name() {
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
        assert_eq!(
            canonical_header_name("access-control-allow-origin"),
            "Access-Control-Allow-Origin"
        );
    }

    #[test]
    fn test_event_query_is_encoded() {
        let request = event(json!({
            "httpMethod": "get",
            "queryStringParameters": {"type": "rules", "category": "a b&c"}
        }))
        .into_request()
        .unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(
            request.uri().to_string(),
            "/api/rules?category=a%20b%26c&type=rules"
        );
    }

    #[test]
    fn test_invalid_method() {
        let err = event(json!({"httpMethod": "NOT A METHOD"}))
            .into_request()
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidMethod(_)));
    }

    #[tokio::test]
    async fn test_options_event() {
        let response = invoke(router().await, event(json!({"httpMethod": "OPTIONS"})))
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "");
        assert!(!response.is_base64_encoded);
        assert_eq!(
            response.headers.get("Access-Control-Allow-Origin").map(String::as_str),
            Some("*")
        );
        assert_eq!(
            response.headers.get("Access-Control-Max-Age").map(String::as_str),
            Some("86400")
        );
        assert!(!response.headers.contains_key("Content-Type"));
    }

    #[tokio::test]
    async fn test_create_and_list_events() {
        let router = router().await;

        let created = invoke(
            router.clone(),
            event(json!({
                "httpMethod": "POST",
                "body": r#"{"type":"rule","category_code":"safety","rule_id":"R1","title":"T","content":"C"}"#
            })),
        )
        .await
        .unwrap();
        assert_eq!(created.status_code, 201);
        assert_eq!(
            created.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );

        let listed = invoke(
            router,
            event(json!({"httpMethod": "GET", "queryStringParameters": {"category": "safety"}})),
        )
        .await
        .unwrap();
        assert_eq!(listed.status_code, 200);

        let created: Value = serde_json::from_str(&created.body).unwrap();
        let listed: Value = serde_json::from_str(&listed.body).unwrap();
        assert_eq!(listed, json!([created]));
    }

    #[tokio::test]
    async fn test_invoke_json_error_shape() {
        let output = invoke_json(
            router().await,
            r#"{"httpMethod":"DELETE","queryStringParameters":{"type":"rule"}}"#,
        )
        .await
        .unwrap();

        let output: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(output["statusCode"], json!(400));
        assert_eq!(output["body"], json!(r#"{"error":"ID required"}"#));
        assert_eq!(output["isBase64Encoded"], json!(false));
    }

    #[tokio::test]
    async fn test_missing_and_empty_body_events() {
        let router = router().await;

        let missing = invoke(router.clone(), event(json!({"httpMethod": "PUT"})))
            .await
            .unwrap();
        assert_eq!(missing.status_code, 400);
        assert_eq!(missing.body, r#"{"error":"ID required"}"#);

        let empty = invoke(router, event(json!({"httpMethod": "POST", "body": ""})))
            .await
            .unwrap();
        assert_eq!(empty.status_code, 500);
    }

    #[tokio::test]
    async fn test_malformed_body_event() {
        let response = invoke(
            router().await,
            event(json!({"httpMethod": "POST", "body": "{oops"})),
        )
        .await
        .unwrap();

        assert_eq!(response.status_code, 500);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert!(body["error"].is_string());
    }
}
