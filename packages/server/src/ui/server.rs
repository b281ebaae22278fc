//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handler::{
        delete_profile, get_movies, get_profile, get_room_detail, get_rooms, get_user,
        health_check, login, register, request_password_reset, reset_password, search_users,
        update_profile, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// HTTP + WebSocket server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, Some(HeaderValue::from_static("http://localhost:5173")));
/// let listener = TcpListener::bind("127.0.0.1:5000").await?;
/// server.run(listener).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    /// Allowed CORS origin. `None` allows any origin.
    cors_origin: Option<HeaderValue>,
}

impl Server {
    pub fn new(state: AppState, cors_origin: Option<HeaderValue>) -> Self {
        Self {
            state: Arc::new(state),
            cors_origin,
        }
    }

    /// Build the router with every endpoint mounted.
    pub fn router(&self) -> Router {
        let cors = match &self.cors_origin {
            Some(origin) => CorsLayer::new().allow_origin(origin.clone()),
            None => CorsLayer::new().allow_origin(Any),
        }
        .allow_methods(Any)
        .allow_headers(Any);

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room}", get(get_room_detail))
            // アカウント
            .route("/auth/register", post(register))
            .route("/auth/login", post(login))
            .route(
                "/auth/profile",
                get(get_profile).put(update_profile).delete(delete_profile),
            )
            .route("/auth/password-reset", post(request_password_reset))
            .route("/auth/password-reset/confirm", post(reset_password))
            .route("/users/search", get(search_users))
            .route("/users/{id}", get(get_user))
            // 映画一覧（TMDB プロキシ）
            .route("/movies", get(get_movies))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serve on `listener` until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener address cannot be read or serving fails.
    pub async fn run(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        tracing::info!("Yagura server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
