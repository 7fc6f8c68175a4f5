//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Category/Rule/Game Repository）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Rule commands
    CreateRule,
    DeleteRule,
    UpdateRule,
    // Game commands
    CreateGame,
    DeleteGame,
    UpdateGame,
    // Handlers
    handlers::{
        CreateGameHandler, CreateRuleHandler, DeleteGameHandler, DeleteRuleHandler,
        UpdateGameHandler, UpdateRuleHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    CategoryRepositoryPort, GameChanges, GameRecord, GameRepositoryPort, NewGame, NewRule,
    RepositoryError, RuleCategoryRecord, RuleChanges, RuleRecord, RuleRepositoryPort,
};

pub use queries::{
    ListCategories,
    ListGames,
    ListRules,
    handlers::{ListCategoriesHandler, ListGamesHandler, ListRulesHandler},
};
