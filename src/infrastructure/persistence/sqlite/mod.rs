//! SQLite Persistence - SQLite 数据库持久化实现

mod category_repo;
mod database;
mod game_repo;
mod rule_repo;

pub use category_repo::SqliteCategoryRepository;
pub use database::{create_pool, ensure_schema, DbPool};
pub use game_repo::SqliteGameRepository;
pub use rule_repo::SqliteRuleRepository;

pub(crate) use database::map_db_error;

#[cfg(test)]
pub(crate) use database::{memory_pool, seed_category};
