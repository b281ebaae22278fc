//! Yagura chat relay and account server.
//!
//! Run with:
//! ```not_rust
//! JWT_SECRET=change-me cargo run --bin yagura-server
//! cargo run --bin yagura-server -- --host 0.0.0.0 --port 3000 --jwt-secret change-me
//! ```

use std::sync::Arc;

use clap::Parser;
use yagura_server::{
    config::ServerConfig,
    infrastructure::{
        auth::{BcryptPasswordHasher, JwtTokenService},
        catalog::TmdbMovieCatalog,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryHistoryRepository, InMemorySessionRepository, InMemoryUserRepository},
    },
    ui::{AppState, Server},
    usecase::{
        ChatRelay, ChatState, HorrorMoviesUseCase, LoginUseCase, PasswordResetUseCase,
        ProfileUseCase, RegisterUseCase, RoomQueryUseCase, UserDirectoryUseCase,
    },
};
use yagura_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_BIN_NAME"),
        &config.log_level,
    );

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. Auth collaborators and movie catalog
    // 4. UseCases
    // 5. AppState
    // 6. Server

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 1. Create Repositories (in-memory)
    let chat_state = ChatState::new(
        Box::new(InMemorySessionRepository::new()),
        Box::new(InMemoryHistoryRepository::new()),
    )
    .shared();
    let users = Arc::new(InMemoryUserRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create auth collaborators and the movie catalog
    let hasher = Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost));
    let tokens = Arc::new(JwtTokenService::with_clock(
        &config.jwt_secret,
        config.token_ttl_hours,
        clock.clone(),
    ));
    if config.tmdb_api_key.is_none() {
        tracing::warn!("TMDB_API_KEY is not set; /movies will fail");
    }
    let catalog = Arc::new(TmdbMovieCatalog::new(
        &config.tmdb_base_url,
        config.tmdb_api_key.clone(),
    ));

    // 4. Create UseCases
    let relay = Arc::new(ChatRelay::new(
        chat_state.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let rooms = Arc::new(RoomQueryUseCase::new(chat_state));
    let register = Arc::new(RegisterUseCase::new(
        users.clone(),
        hasher.clone(),
        tokens.clone(),
        clock.clone(),
    ));
    let login = Arc::new(LoginUseCase::new(
        users.clone(),
        hasher.clone(),
        tokens.clone(),
    ));
    let profile = Arc::new(ProfileUseCase::new(
        users.clone(),
        hasher.clone(),
        clock.clone(),
    ));
    let password_reset = Arc::new(PasswordResetUseCase::new(
        users.clone(),
        hasher,
        tokens.clone(),
        clock,
    ));
    let user_directory = Arc::new(UserDirectoryUseCase::new(users));
    let movies = Arc::new(HorrorMoviesUseCase::new(catalog));

    // 5. Create AppState
    let app_state = AppState {
        relay,
        message_pusher,
        rooms,
        register,
        login,
        profile,
        password_reset,
        user_directory,
        movies,
        tokens,
        socket: config.socket_settings(),
    };

    // 6. Create and run the server
    let cors_origin = match config.cors_origin() {
        Ok(origin) => origin,
        Err(e) => {
            tracing::error!("Invalid CORS origin '{}': {}", config.cors_origin, e);
            std::process::exit(1);
        }
    };
    let listener = match tokio::net::TcpListener::bind(config.bind_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.bind_addr(), e);
            std::process::exit(1);
        }
    };

    let server = Server::new(app_state, cors_origin);
    if let Err(e) = server.run(listener).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
