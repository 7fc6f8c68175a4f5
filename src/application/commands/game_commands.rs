//! Game Commands

use crate::application::ports::{GameChanges, NewGame};

/// 创建游戏命令
#[derive(Debug, Clone)]
pub struct CreateGame {
    pub game: NewGame,
}

/// 更新游戏命令（整体替换可变字段）
#[derive(Debug, Clone)]
pub struct UpdateGame {
    pub id: i64,
    pub changes: GameChanges,
}

/// 删除游戏命令
#[derive(Debug, Clone)]
pub struct DeleteGame {
    pub id: i64,
}
