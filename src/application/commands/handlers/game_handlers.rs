//! Game Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateGame, DeleteGame, UpdateGame};
use crate::application::error::ApplicationError;
use crate::application::ports::{GameRecord, GameRepositoryPort};

const RESOURCE: &str = "Game";

/// CreateGame Handler
pub struct CreateGameHandler {
    game_repo: Arc<dyn GameRepositoryPort>,
}

impl CreateGameHandler {
    pub fn new(game_repo: Arc<dyn GameRepositoryPort>) -> Self {
        Self { game_repo }
    }

    pub async fn handle(&self, command: CreateGame) -> Result<GameRecord, ApplicationError> {
        let game = self.game_repo.insert(&command.game).await?;

        tracing::info!(id = game.id, game_id = %game.game_id, name = %game.name, "Game created");

        Ok(game)
    }
}

/// UpdateGame Handler
pub struct UpdateGameHandler {
    game_repo: Arc<dyn GameRepositoryPort>,
}

impl UpdateGameHandler {
    pub fn new(game_repo: Arc<dyn GameRepositoryPort>) -> Self {
        Self { game_repo }
    }

    pub async fn handle(&self, command: UpdateGame) -> Result<GameRecord, ApplicationError> {
        let game = self
            .game_repo
            .update(command.id, &command.changes)
            .await?
            .ok_or_else(|| ApplicationError::not_found(RESOURCE, command.id))?;

        tracing::info!(id = game.id, game_id = %game.game_id, "Game updated");

        Ok(game)
    }
}

/// DeleteGame Handler
pub struct DeleteGameHandler {
    game_repo: Arc<dyn GameRepositoryPort>,
}

impl DeleteGameHandler {
    pub fn new(game_repo: Arc<dyn GameRepositoryPort>) -> Self {
        Self { game_repo }
    }

    pub async fn handle(&self, command: DeleteGame) -> Result<(), ApplicationError> {
        if !self.game_repo.delete(command.id).await? {
            return Err(ApplicationError::not_found(RESOURCE, command.id));
        }

        tracing::info!(id = command.id, "Game deleted");

        Ok(())
    }
}
