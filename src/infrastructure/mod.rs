//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现以及对外的 HTTP / 网关事件入口

pub mod gateway;
pub mod http;
pub mod persistence;

pub use http::{build_router, AppState, HttpServer};
