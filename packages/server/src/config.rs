//! Server configuration, read from command-line flags with environment fallbacks.

use std::time::Duration;

use axum::http::HeaderValue;
use clap::Parser;

use crate::{
    infrastructure::{auth::password::DEFAULT_BCRYPT_COST, catalog::TMDB_BASE_URL},
    ui::SocketSettings,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "yagura-server")]
#[command(about = "Chat relay and account server", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "YAGURA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Secret used to sign access tokens (HS256)
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Lifetime of issued access tokens
    #[arg(long, env = "TOKEN_TTL_HOURS", default_value_t = 24)]
    pub token_ttl_hours: u32,

    /// bcrypt work factor
    #[arg(long, env = "BCRYPT_COST", default_value_t = DEFAULT_BCRYPT_COST)]
    pub bcrypt_cost: u32,

    /// Seconds between WebSocket pings
    #[arg(long, env = "PING_INTERVAL_SECS", default_value_t = 25)]
    pub ping_interval_secs: u64,

    /// Extra seconds a silent connection is kept open after a ping interval
    #[arg(long, env = "PING_TIMEOUT_SECS", default_value_t = 20)]
    pub ping_timeout_secs: u64,

    /// Require a valid `?token=` on WebSocket connections
    #[arg(long, env = "REQUIRE_SOCKET_AUTH")]
    pub require_socket_auth: bool,

    /// TMDB API key used by `/movies`
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[arg(long, env = "TMDB_BASE_URL", default_value = TMDB_BASE_URL)]
    pub tmdb_base_url: String,

    /// Allowed CORS origin ("*" allows any)
    #[arg(long, env = "CORS_ORIGIN", default_value = "http://localhost:5173")]
    pub cors_origin: String,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn socket_settings(&self) -> SocketSettings {
        SocketSettings {
            ping_interval: Duration::from_secs(self.ping_interval_secs.max(1)),
            ping_timeout: Duration::from_secs(self.ping_timeout_secs),
            require_auth: self.require_socket_auth,
        }
    }

    /// Parsed CORS origin. `None` allows any origin.
    pub fn cors_origin(&self) -> Result<Option<HeaderValue>, axum::http::header::InvalidHeaderValue> {
        if self.cors_origin == "*" {
            return Ok(None);
        }
        HeaderValue::from_str(&self.cors_origin).map(Some)
    }
}
