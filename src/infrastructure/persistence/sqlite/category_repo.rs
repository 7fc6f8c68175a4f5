//! SQLite Rule Category Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::{map_db_error, DbPool};
use crate::application::ports::{CategoryRepositoryPort, RepositoryError, RuleCategoryRecord};

/// SQLite Rule Category Repository
pub struct SqliteCategoryRepository {
    pool: DbPool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CategoryRow {
    code: String,
    name: String,
    icon: String,
    color: String,
    display_order: i64,
}

impl From<CategoryRow> for RuleCategoryRecord {
    fn from(row: CategoryRow) -> Self {
        RuleCategoryRecord {
            code: row.code,
            name: row.name,
            icon: row.icon,
            color: row.color,
            display_order: row.display_order,
        }
    }
}

#[async_trait]
impl CategoryRepositoryPort for SqliteCategoryRepository {
    async fn find_all(&self) -> Result<Vec<RuleCategoryRecord>, RepositoryError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            "SELECT code, name, icon, color, display_order FROM rule_categories ORDER BY display_order",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(RuleCategoryRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{memory_pool, seed_category};

    #[tokio::test]
    async fn test_categories_ordered_by_display_order() {
        let pool = memory_pool().await;
        seed_category(&pool, "weapons", 2).await;
        seed_category(&pool, "safety", 1).await;
        seed_category(&pool, "conduct", 3).await;

        let repo = SqliteCategoryRepository::new(pool);
        let codes: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.code)
            .collect();

        assert_eq!(codes, vec!["safety", "weapons", "conduct"]);
    }
}
