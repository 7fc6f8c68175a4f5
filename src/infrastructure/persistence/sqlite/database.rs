//! SQLite Database - 数据库连接和表结构引导

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::application::ports::RepositoryError;
use crate::config::DatabaseConfig;

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 遇到锁时的等待时间
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// 创建数据库连接池
///
/// WAL 和 busy_timeout 写在连接选项里，池中每个连接建立时都会设置
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "SQLite pool created with WAL mode and busy_timeout=5000ms"
    );

    Ok(pool)
}

/// 创建缺失的表
///
/// 表结构通常由外部维护，这里只用于本地开发和测试
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rule_categories (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            icon TEXT NOT NULL DEFAULT '',
            color TEXT NOT NULL DEFAULT '',
            display_order INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rules (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_code TEXT NOT NULL,
            rule_id TEXT NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            display_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (category_code) REFERENCES rule_categories(code),
            UNIQUE (category_code, rule_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS games (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            game_id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            min_players INTEGER,
            max_weapons INTEGER,
            display_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_rules_category_order
        ON rules(category_code, display_order, rule_id)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema ensured");
    Ok(())
}

/// 将 sqlx 错误转换为仓储错误，约束冲突单独区分
pub(crate) fn map_db_error(err: sqlx::Error) -> RepositoryError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation()
            || db_err.is_foreign_key_violation()
            || db_err.is_check_violation()
        {
            return RepositoryError::ConstraintViolation(db_err.message().to_string());
        }
    }
    RepositoryError::DatabaseError(err.to_string())
}

/// 带完整表结构的内存数据库
#[cfg(test)]
pub(crate) async fn memory_pool() -> DbPool {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    ensure_schema(&pool).await.unwrap();
    pool
}

/// 写入一个分类，供依赖外键的测试使用
#[cfg(test)]
pub(crate) async fn seed_category(pool: &DbPool, code: &str, display_order: i64) {
    sqlx::query(
        "INSERT INTO rule_categories (code, name, icon, color, display_order) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(code)
    .bind(format!("{} rules", code))
    .bind("Shield")
    .bind("#ff0000")
    .bind(display_order)
    .execute(pool)
    .await
    .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let pool = memory_pool().await;
        ensure_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_every_connection_gets_busy_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite:{}?mode=rwc", dir.path().join("rulebook.db").display()),
            max_connections: 2,
            bootstrap_schema: false,
        };
        let pool = create_pool(&config).await.unwrap();

        let mut first = pool.acquire().await.unwrap();
        let mut second = pool.acquire().await.unwrap();
        for conn in [&mut first, &mut second] {
            let (timeout,): (i64,) = sqlx::query_as("PRAGMA busy_timeout")
                .fetch_one(&mut **conn)
                .await
                .unwrap();
            assert_eq!(timeout, 5000);

            let (mode,): (String,) = sqlx::query_as("PRAGMA journal_mode")
                .fetch_one(&mut **conn)
                .await
                .unwrap();
            assert_eq!(mode.to_lowercase(), "wal");
        }
    }

    #[tokio::test]
    async fn test_unique_violation_maps_to_constraint() {
        let pool = memory_pool().await;
        seed_category(&pool, "safety", 0).await;

        let err = sqlx::query("INSERT INTO rule_categories (code, name) VALUES ('safety', 'x')")
            .execute(&pool)
            .await
            .unwrap_err();

        assert!(matches!(
            map_db_error(err),
            RepositoryError::ConstraintViolation(_)
        ));
    }
}
