//! SQLite Rule Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::{map_db_error, DbPool};
use crate::application::ports::{
    NewRule, RepositoryError, RuleChanges, RuleRecord, RuleRepositoryPort,
};

/// SQLite Rule Repository
///
/// 写操作各自在一个事务内完成，提交前出错时事务随 drop 回滚
pub struct SqliteRuleRepository {
    pool: DbPool,
}

impl SqliteRuleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RuleRow {
    id: i64,
    category_code: String,
    rule_id: String,
    title: String,
    content: String,
    display_order: i64,
}

impl From<RuleRow> for RuleRecord {
    fn from(row: RuleRow) -> Self {
        RuleRecord {
            id: row.id,
            category_code: row.category_code,
            rule_id: row.rule_id,
            title: row.title,
            content: row.content,
            display_order: row.display_order,
        }
    }
}

#[async_trait]
impl RuleRepositoryPort for SqliteRuleRepository {
    async fn find_all(&self) -> Result<Vec<RuleRecord>, RepositoryError> {
        let rows: Vec<RuleRow> = sqlx::query_as(
            r#"
            SELECT id, category_code, rule_id, title, content, display_order
            FROM rules
            ORDER BY category_code, display_order, rule_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(RuleRecord::from).collect())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<RuleRecord>, RepositoryError> {
        let rows: Vec<RuleRow> = sqlx::query_as(
            r#"
            SELECT id, category_code, rule_id, title, content, display_order
            FROM rules
            WHERE category_code = ?
            ORDER BY display_order, rule_id
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(RuleRecord::from).collect())
    }

    async fn insert(&self, rule: &NewRule) -> Result<RuleRecord, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let row: RuleRow = sqlx::query_as(
            r#"
            INSERT INTO rules (category_code, rule_id, title, content, display_order)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, category_code, rule_id, title, content, display_order
            "#,
        )
        .bind(&rule.category_code)
        .bind(&rule.rule_id)
        .bind(&rule.title)
        .bind(&rule.content)
        .bind(rule.display_order)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: i64,
        changes: &RuleChanges,
    ) -> Result<Option<RuleRecord>, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let row: Option<RuleRow> = sqlx::query_as(
            r#"
            UPDATE rules
            SET title = ?, content = ?, display_order = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING id, category_code, rule_id, title, content, display_order
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(changes.display_order)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if row.is_some() {
            tx.commit().await.map_err(map_db_error)?;
        }

        Ok(row.map(RuleRecord::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM rules WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(true)
    }
}
