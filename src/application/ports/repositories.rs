//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use thiserror::Error;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    DatabaseError(String),

    /// 唯一键、外键等约束冲突
    #[error("{0}")]
    ConstraintViolation(String),
}

// ============================================================================
// Rule Category Repository
// ============================================================================

/// 规则分类（只读）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCategoryRecord {
    pub code: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub display_order: i64,
}

/// Rule Category Repository Port
#[async_trait]
pub trait CategoryRepositoryPort: Send + Sync {
    /// 获取所有分类，按 display_order 排序
    async fn find_all(&self) -> Result<Vec<RuleCategoryRecord>, RepositoryError>;
}

// ============================================================================
// Rule Repository
// ============================================================================

/// 规则实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    pub id: i64,
    pub category_code: String,
    pub rule_id: String,
    pub title: String,
    pub content: String,
    pub display_order: i64,
}

/// 新规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRule {
    pub category_code: String,
    pub rule_id: String,
    pub title: String,
    pub content: String,
    pub display_order: i64,
}

/// 规则的可变字段（整体替换）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleChanges {
    pub title: String,
    pub content: String,
    pub display_order: i64,
}

/// Rule Repository Port
#[async_trait]
pub trait RuleRepositoryPort: Send + Sync {
    /// 获取所有规则，按 (category_code, display_order, rule_id) 排序
    async fn find_all(&self) -> Result<Vec<RuleRecord>, RepositoryError>;

    /// 获取指定分类的规则，按 (display_order, rule_id) 排序
    async fn find_by_category(&self, category: &str) -> Result<Vec<RuleRecord>, RepositoryError>;

    /// 插入规则，返回带生成 id 的完整记录
    async fn insert(&self, rule: &NewRule) -> Result<RuleRecord, RepositoryError>;

    /// 更新规则，未命中时返回 `None`
    async fn update(
        &self,
        id: i64,
        changes: &RuleChanges,
    ) -> Result<Option<RuleRecord>, RepositoryError>;

    /// 删除规则，返回是否命中
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}

// ============================================================================
// Game Repository
// ============================================================================

/// 游戏实体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub id: i64,
    pub game_id: String,
    pub name: String,
    pub description: String,
    pub min_players: Option<i64>,
    pub max_weapons: Option<i64>,
    pub display_order: i64,
}

/// 新游戏
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    pub game_id: String,
    pub name: String,
    pub description: String,
    pub min_players: Option<i64>,
    pub max_weapons: Option<i64>,
    pub display_order: i64,
}

/// 游戏的可变字段（整体替换）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameChanges {
    pub name: String,
    pub description: String,
    pub min_players: Option<i64>,
    pub max_weapons: Option<i64>,
    pub display_order: i64,
}

/// Game Repository Port
#[async_trait]
pub trait GameRepositoryPort: Send + Sync {
    /// 获取所有游戏，按 (display_order, name) 排序
    async fn find_all(&self) -> Result<Vec<GameRecord>, RepositoryError>;

    /// 插入游戏，返回带生成 id 的完整记录
    async fn insert(&self, game: &NewGame) -> Result<GameRecord, RepositoryError>;

    /// 更新游戏，未命中时返回 `None`
    async fn update(
        &self,
        id: i64,
        changes: &GameChanges,
    ) -> Result<Option<GameRecord>, RepositoryError>;

    /// 删除游戏，返回是否命中
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}
