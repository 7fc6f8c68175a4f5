//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod game_handlers;
mod rule_handlers;

pub use game_handlers::*;
pub use rule_handlers::*;
