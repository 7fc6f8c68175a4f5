//! Rulebook - 服务器规则与游戏模式管理 API
//!
//! 架构设计: CQRS + Hexagonal Architecture
//!
//! 应用层 (application/):
//! - Ports: 仓储端口（Category, Rule, Game）
//! - Commands: 规则/游戏的创建、更新、删除
//! - Queries: 分类、规则、游戏列表
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 单端点 RESTful API，按方法和 `type` 分派
//! - Gateway: serverless 网关事件适配
//! - Persistence: SQLite 存储

pub mod application;
pub mod config;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
