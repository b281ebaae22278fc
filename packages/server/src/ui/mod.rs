//! UI 層
//!
//! HTTP / WebSocket のエンドポイントを提供し、リクエストを UseCase に委譲します。

mod error;
mod extractor;
mod handler;
mod server;
mod signal;
pub mod state;

pub use error::ApiError;
pub use extractor::AuthUser;
pub use server::Server;
pub use state::{AppState, SocketSettings};
