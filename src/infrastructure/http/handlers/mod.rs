//! HTTP Handlers

mod catalog;
mod ping;

pub use catalog::*;
pub use ping::*;
