//! SQLite Game Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::{map_db_error, DbPool};
use crate::application::ports::{
    GameChanges, GameRecord, GameRepositoryPort, NewGame, RepositoryError,
};

/// SQLite Game Repository
pub struct SqliteGameRepository {
    pool: DbPool,
}

impl SqliteGameRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct GameRow {
    id: i64,
    game_id: String,
    name: String,
    description: String,
    min_players: Option<i64>,
    max_weapons: Option<i64>,
    display_order: i64,
}

impl From<GameRow> for GameRecord {
    fn from(row: GameRow) -> Self {
        GameRecord {
            id: row.id,
            game_id: row.game_id,
            name: row.name,
            description: row.description,
            min_players: row.min_players,
            max_weapons: row.max_weapons,
            display_order: row.display_order,
        }
    }
}

#[async_trait]
impl GameRepositoryPort for SqliteGameRepository {
    async fn find_all(&self) -> Result<Vec<GameRecord>, RepositoryError> {
        let rows: Vec<GameRow> = sqlx::query_as(
            r#"
            SELECT id, game_id, name, description, min_players, max_weapons, display_order
            FROM games
            ORDER BY display_order, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(GameRecord::from).collect())
    }

    async fn insert(&self, game: &NewGame) -> Result<GameRecord, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let row: GameRow = sqlx::query_as(
            r#"
            INSERT INTO games (game_id, name, description, min_players, max_weapons, display_order)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, game_id, name, description, min_players, max_weapons, display_order
            "#,
        )
        .bind(&game.game_id)
        .bind(&game.name)
        .bind(&game.description)
        .bind(game.min_players)
        .bind(game.max_weapons)
        .bind(game.display_order)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: i64,
        changes: &GameChanges,
    ) -> Result<Option<GameRecord>, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let row: Option<GameRow> = sqlx::query_as(
            r#"
            UPDATE games
            SET name = ?, description = ?, min_players = ?, max_weapons = ?,
                display_order = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING id, game_id, name, description, min_players, max_weapons, display_order
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.min_players)
        .bind(changes.max_weapons)
        .bind(changes.display_order)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if row.is_some() {
            tx.commit().await.map_err(map_db_error)?;
        }

        Ok(row.map(GameRecord::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM games WHERE id = ?")
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::memory_pool;

    fn new_game(game_id: &str, name: &str, display_order: i64) -> NewGame {
        NewGame {
            game_id: game_id.to_string(),
            name: name.to_string(),
            description: format!("{} description", name),
            min_players: None,
            max_weapons: None,
            display_order,
        }
    }

    #[tokio::test]
    async fn test_insert_keeps_optional_fields() {
        let repo = SqliteGameRepository::new(memory_pool().await);

        let mut game = new_game("ctf", "Capture the Flag", 0);
        game.min_players = Some(4);
        let created = repo.insert(&game).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.min_players, Some(4));
        assert_eq!(created.max_weapons, None);
    }

    #[tokio::test]
    async fn test_find_all_orders_by_display_order_then_name() {
        let repo = SqliteGameRepository::new(memory_pool().await);
        repo.insert(&new_game("g1", "Zombies", 1)).await.unwrap();
        repo.insert(&new_game("g2", "Arena", 1)).await.unwrap();
        repo.insert(&new_game("g3", "Teams", 0)).await.unwrap();

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();

        assert_eq!(names, vec!["Teams", "Arena", "Zombies"]);
    }

    #[tokio::test]
    async fn test_update_clears_optional_fields() {
        let repo = SqliteGameRepository::new(memory_pool().await);
        let mut game = new_game("ctf", "CTF", 2);
        game.max_weapons = Some(3);
        let created = repo.insert(&game).await.unwrap();

        let changes = GameChanges {
            name: "CTF v2".to_string(),
            description: "new".to_string(),
            min_players: Some(2),
            max_weapons: None,
            display_order: 0,
        };
        let updated = repo.update(created.id, &changes).await.unwrap().unwrap();

        assert_eq!(updated.game_id, "ctf");
        assert_eq!(updated.name, "CTF v2");
        assert_eq!(updated.min_players, Some(2));
        assert_eq!(updated.max_weapons, None);
        assert_eq!(updated.display_order, 0);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = SqliteGameRepository::new(memory_pool().await);
        let created = repo.insert(&new_game("ctf", "CTF", 0)).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
