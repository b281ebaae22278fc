//! Shared application state.

use std::{sync::Arc, time::Duration};

use crate::{
    domain::{MessagePusher, TokenService},
    usecase::{
        ChatRelay, HorrorMoviesUseCase, LoginUseCase, PasswordResetUseCase, ProfileUseCase,
        RegisterUseCase, RoomQueryUseCase, UserDirectoryUseCase,
    },
};

/// WebSocket connection settings
#[derive(Debug, Clone, Copy)]
pub struct SocketSettings {
    /// Interval between server pings
    pub ping_interval: Duration,
    /// How long past a ping interval a silent connection is kept open
    pub ping_timeout: Duration,
    /// Reject upgrades without a valid `?token=`
    pub require_auth: bool,
}

impl SocketSettings {
    /// Idle time after which a connection is treated as dead.
    pub fn idle_timeout(&self) -> Duration {
        self.ping_interval + self.ping_timeout
    }
}

pub struct AppState {
    /// Relay（チャット・プレゼンス）
    pub relay: Arc<ChatRelay>,
    /// MessagePusher（接続ごとの送信チャンネル管理）
    pub message_pusher: Arc<dyn MessagePusher>,
    pub rooms: Arc<RoomQueryUseCase>,
    pub register: Arc<RegisterUseCase>,
    pub login: Arc<LoginUseCase>,
    pub profile: Arc<ProfileUseCase>,
    pub password_reset: Arc<PasswordResetUseCase>,
    pub user_directory: Arc<UserDirectoryUseCase>,
    pub movies: Arc<HorrorMoviesUseCase>,
    /// Bearer トークンの検証
    pub tokens: Arc<dyn TokenService>,
    pub socket: SocketSettings,
}
