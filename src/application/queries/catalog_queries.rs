//! Catalog Queries

/// 列出所有规则分类
#[derive(Debug, Clone)]
pub struct ListCategories;

/// 列出规则，可按分类过滤
#[derive(Debug, Clone, Default)]
pub struct ListRules {
    pub category: Option<String>,
}

/// 列出所有游戏
#[derive(Debug, Clone)]
pub struct ListGames;
