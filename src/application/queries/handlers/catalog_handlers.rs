//! Catalog Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    CategoryRepositoryPort, GameRecord, GameRepositoryPort, RuleCategoryRecord, RuleRecord,
    RuleRepositoryPort,
};
use crate::application::queries::{ListCategories, ListGames, ListRules};

/// ListCategories Handler
pub struct ListCategoriesHandler {
    category_repo: Arc<dyn CategoryRepositoryPort>,
}

impl ListCategoriesHandler {
    pub fn new(category_repo: Arc<dyn CategoryRepositoryPort>) -> Self {
        Self { category_repo }
    }

    pub async fn handle(
        &self,
        _query: ListCategories,
    ) -> Result<Vec<RuleCategoryRecord>, ApplicationError> {
        Ok(self.category_repo.find_all().await?)
    }
}

/// ListRules Handler
pub struct ListRulesHandler {
    rule_repo: Arc<dyn RuleRepositoryPort>,
}

impl ListRulesHandler {
    pub fn new(rule_repo: Arc<dyn RuleRepositoryPort>) -> Self {
        Self { rule_repo }
    }

    pub async fn handle(&self, query: ListRules) -> Result<Vec<RuleRecord>, ApplicationError> {
        // 空字符串等同于不过滤
        let rules = match query.category.as_deref().filter(|c| !c.is_empty()) {
            Some(category) => self.rule_repo.find_by_category(category).await?,
            None => self.rule_repo.find_all().await?,
        };

        tracing::debug!(count = rules.len(), category = ?query.category, "Rules listed");

        Ok(rules)
    }
}

/// ListGames Handler
pub struct ListGamesHandler {
    game_repo: Arc<dyn GameRepositoryPort>,
}

impl ListGamesHandler {
    pub fn new(game_repo: Arc<dyn GameRepositoryPort>) -> Self {
        Self { game_repo }
    }

    pub async fn handle(&self, _query: ListGames) -> Result<Vec<GameRecord>, ApplicationError> {
        Ok(self.game_repo.find_all().await?)
    }
}
