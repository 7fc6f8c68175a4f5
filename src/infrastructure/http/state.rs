//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateGameHandler, CreateRuleHandler, DeleteGameHandler, DeleteRuleHandler,
    UpdateGameHandler, UpdateRuleHandler,
    // Query handlers
    ListCategoriesHandler, ListGamesHandler, ListRulesHandler,
    // Ports
    CategoryRepositoryPort, GameRepositoryPort, RuleRepositoryPort,
};
use crate::config::DatabaseConfig;
use crate::infrastructure::persistence::sqlite::{
    create_pool, ensure_schema, DbPool, SqliteCategoryRepository, SqliteGameRepository,
    SqliteRuleRepository,
};

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub create_rule_handler: CreateRuleHandler,
    pub update_rule_handler: UpdateRuleHandler,
    pub delete_rule_handler: DeleteRuleHandler,
    pub create_game_handler: CreateGameHandler,
    pub update_game_handler: UpdateGameHandler,
    pub delete_game_handler: DeleteGameHandler,

    // ========== Query Handlers ==========
    pub list_categories_handler: ListCategoriesHandler,
    pub list_rules_handler: ListRulesHandler,
    pub list_games_handler: ListGamesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        category_repo: Arc<dyn CategoryRepositoryPort>,
        rule_repo: Arc<dyn RuleRepositoryPort>,
        game_repo: Arc<dyn GameRepositoryPort>,
    ) -> Self {
        Self {
            // Command handlers
            create_rule_handler: CreateRuleHandler::new(rule_repo.clone()),
            update_rule_handler: UpdateRuleHandler::new(rule_repo.clone()),
            delete_rule_handler: DeleteRuleHandler::new(rule_repo.clone()),
            create_game_handler: CreateGameHandler::new(game_repo.clone()),
            update_game_handler: UpdateGameHandler::new(game_repo.clone()),
            delete_game_handler: DeleteGameHandler::new(game_repo.clone()),

            // Query handlers
            list_categories_handler: ListCategoriesHandler::new(category_repo),
            list_rules_handler: ListRulesHandler::new(rule_repo),
            list_games_handler: ListGamesHandler::new(game_repo),
        }
    }

    /// 基于 SQLite 连接池创建
    pub fn from_pool(pool: DbPool) -> Self {
        Self::new(
            Arc::new(SqliteCategoryRepository::new(pool.clone())),
            Arc::new(SqliteRuleRepository::new(pool.clone())),
            Arc::new(SqliteGameRepository::new(pool)),
        )
    }

    /// 按显式传入的数据库配置连接并创建
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = create_pool(config).await?;
        if config.bootstrap_schema {
            ensure_schema(&pool).await?;
        }
        Ok(Self::from_pool(pool))
    }
}
