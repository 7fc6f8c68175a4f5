//! Data Transfer Objects
//!
//! 请求侧把 `type` 判别字段解码成带标签的枚举，响应侧负责行的 JSON 形状

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;
use crate::application::ports::{
    GameChanges, GameRecord, NewGame, NewRule, RuleCategoryRecord, RuleChanges, RuleRecord,
};

// ============================================================================
// 请求解码
// ============================================================================

/// 查询参数（GET / DELETE）
#[derive(Debug, Default, Clone)]
pub struct CatalogQuery {
    pub resource_type: Option<String>,
    pub category: Option<String>,
    pub id: Option<String>,
}

impl CatalogQuery {
    /// 从原始参数构建，重复的键只保留最后一个，其余键忽略
    pub fn from_params(mut params: HashMap<String, String>) -> Self {
        Self {
            resource_type: params.remove("type"),
            category: params.remove("category"),
            id: params.remove("id"),
        }
    }
}

/// GET 请求的目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    Categories,
    Games,
    Rules { category: Option<String> },
}

impl ListRequest {
    /// 未知或缺省的 type 都按规则列表处理
    pub fn from_query(query: &CatalogQuery) -> Self {
        match query.resource_type.as_deref() {
            Some("categories") => ListRequest::Categories,
            Some("games") => ListRequest::Games,
            _ => ListRequest::Rules {
                category: query.category.clone().filter(|c| !c.is_empty()),
            },
        }
    }
}

/// POST 请求体
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRequest {
    Rule(NewRule),
    Game(NewGame),
}

impl CreateRequest {
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let value = parse_body(body)?;

        match resource_type(&value) {
            Some("rule") => Ok(CreateRequest::Rule(decode::<CreateRulePayload>(value)?.into())),
            Some("game") => Ok(CreateRequest::Game(decode::<CreateGamePayload>(value)?.into())),
            _ => Err(ApiError::invalid_type()),
        }
    }
}

/// PUT 请求体，先检查 id 是否提供，再按 type 分派
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateRequest {
    Rule { id: i64, changes: RuleChanges },
    Game { id: i64, changes: GameChanges },
}

impl UpdateRequest {
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let value = parse_body(body)?;
        let raw_id = match value.get("id") {
            Some(id) if is_truthy(id) => id.clone(),
            _ => return Err(ApiError::id_required()),
        };

        match resource_type(&value) {
            Some("rule") => Ok(UpdateRequest::Rule {
                id: json_id(&raw_id)?,
                changes: decode::<UpdateRulePayload>(value)?.into(),
            }),
            Some("game") => Ok(UpdateRequest::Game {
                id: json_id(&raw_id)?,
                changes: decode::<UpdateGamePayload>(value)?.into(),
            }),
            _ => Err(ApiError::invalid_type()),
        }
    }
}

/// DELETE 查询参数，先检查 id 是否提供，再按 type 分派
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRequest {
    Rule { id: i64 },
    Game { id: i64 },
}

impl DeleteRequest {
    pub fn from_query(query: &CatalogQuery) -> Result<Self, ApiError> {
        let raw_id = match query.id.as_deref() {
            None | Some("") => return Err(ApiError::id_required()),
            Some(raw) => raw,
        };

        match query.resource_type.as_deref() {
            Some("rule") => Ok(DeleteRequest::Rule {
                id: parse_id(raw_id)?,
            }),
            Some("game") => Ok(DeleteRequest::Game {
                id: parse_id(raw_id)?,
            }),
            _ => Err(ApiError::invalid_type()),
        }
    }
}

/// 请求体必须是 JSON，空请求体同样按解析失败处理
fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Internal(e.to_string()))
}

fn resource_type(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}

/// null、false、空串、任意数值 0、空数组和空对象都视为未提供
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// 数字或数字字符串
fn json_id(value: &Value) -> Result<i64, ApiError> {
    match value {
        Value::String(s) => parse_id(s),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ApiError::Internal(format!("Invalid id: {}", n))),
        other => Err(ApiError::Internal(format!("Invalid id: {}", other))),
    }
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::Internal(format!("Invalid id: {}", raw)))
}

#[derive(Debug, Deserialize)]
struct CreateRulePayload {
    category_code: String,
    rule_id: String,
    title: String,
    content: String,
    #[serde(default)]
    display_order: Option<i64>,
}

impl From<CreateRulePayload> for NewRule {
    fn from(p: CreateRulePayload) -> Self {
        NewRule {
            category_code: p.category_code,
            rule_id: p.rule_id,
            title: p.title,
            content: p.content,
            display_order: p.display_order.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateRulePayload {
    title: String,
    content: String,
    #[serde(default)]
    display_order: Option<i64>,
}

impl From<UpdateRulePayload> for RuleChanges {
    fn from(p: UpdateRulePayload) -> Self {
        RuleChanges {
            title: p.title,
            content: p.content,
            display_order: p.display_order.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateGamePayload {
    game_id: String,
    name: String,
    description: String,
    #[serde(default)]
    min_players: Option<i64>,
    #[serde(default)]
    max_weapons: Option<i64>,
    #[serde(default)]
    display_order: Option<i64>,
}

impl From<CreateGamePayload> for NewGame {
    fn from(p: CreateGamePayload) -> Self {
        NewGame {
            game_id: p.game_id,
            name: p.name,
            description: p.description,
            min_players: p.min_players,
            max_weapons: p.max_weapons,
            display_order: p.display_order.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateGamePayload {
    name: String,
    description: String,
    #[serde(default)]
    min_players: Option<i64>,
    #[serde(default)]
    max_weapons: Option<i64>,
    #[serde(default)]
    display_order: Option<i64>,
}

impl From<UpdateGamePayload> for GameChanges {
    fn from(p: UpdateGamePayload) -> Self {
        GameChanges {
            name: p.name,
            description: p.description,
            min_players: p.min_players,
            max_weapons: p.max_weapons,
            display_order: p.display_order.unwrap_or_default(),
        }
    }
}

// ============================================================================
// 响应
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub code: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub display_order: i64,
}

impl From<RuleCategoryRecord> for CategoryResponse {
    fn from(record: RuleCategoryRecord) -> Self {
        Self {
            code: record.code,
            name: record.name,
            icon: record.icon,
            color: record.color,
            display_order: record.display_order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RuleResponse {
    pub id: i64,
    pub category_code: String,
    pub rule_id: String,
    pub title: String,
    pub content: String,
    pub display_order: i64,
}

impl From<RuleRecord> for RuleResponse {
    fn from(record: RuleRecord) -> Self {
        Self {
            id: record.id,
            category_code: record.category_code,
            rule_id: record.rule_id,
            title: record.title,
            content: record.content,
            display_order: record.display_order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub id: i64,
    pub game_id: String,
    pub name: String,
    pub description: String,
    pub min_players: Option<i64>,
    pub max_weapons: Option<i64>,
    pub display_order: i64,
}

impl From<GameRecord> for GameResponse {
    fn from(record: GameRecord) -> Self {
        Self {
            id: record.id,
            game_id: record.game_id,
            name: record.name,
            description: record.description,
            min_players: record.min_players,
            max_weapons: record.max_weapons,
            display_order: record.display_order,
        }
    }
}

/// DELETE 成功响应
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
