//! Test fixtures shared by the use case tests.

use std::sync::Arc;

use tokio::sync::mpsc;
use yagura_shared::time::{Clock, FixedClock};

use crate::{
    domain::{ConnectionId, DisplayName, MessagePusher, PasswordHasher, RoomName, TokenService},
    infrastructure::{
        auth::{BcryptPasswordHasher, JwtTokenService},
        dto::websocket::ServerEventDto,
        message_pusher::WebSocketMessagePusher,
        repository::{
            InMemoryHistoryRepository, InMemorySessionRepository, InMemoryUserRepository,
        },
    },
};

use super::{
    chat_state::{ChatState, SharedChatState},
    register::{RegisterInput, RegisterUseCase},
};

/// 2023-01-01T00:00:00Z
pub const FIXED_NOW: i64 = 1_672_531_200_000;

pub struct Harness {
    pub state: SharedChatState,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<dyn Clock>,
}

impl Harness {
    pub fn new() -> Self {
        let state = ChatState::new(
            Box::new(InMemorySessionRepository::new()),
            Box::new(InMemoryHistoryRepository::new()),
        )
        .shared();
        Self {
            state,
            pusher: Arc::new(WebSocketMessagePusher::new()),
            clock: Arc::new(FixedClock::new(FIXED_NOW)),
        }
    }

    /// Open a transport connection (Connected-Unjoined).
    pub async fn connect(&self, id: &str) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let connection_id = conn(id);
        let (tx, rx) = mpsc::unbounded_channel();
        self.pusher.register_client(connection_id.clone(), tx).await;
        (connection_id, rx)
    }
}

pub fn conn(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

pub fn name(value: &str) -> DisplayName {
    DisplayName::new(value.to_string()).unwrap()
}

pub fn room(value: &str) -> RoomName {
    RoomName::new(value.to_string()).unwrap()
}

/// Decode every frame queued for a connection so far.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerEventDto> {
    let mut events = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        events.push(serde_json::from_str(&frame).unwrap());
    }
    events
}

/// Event names of the queued frames, in order.
pub fn kinds(events: &[ServerEventDto]) -> Vec<&'static str> {
    events
        .iter()
        .map(|event| match event {
            ServerEventDto::MessageHistory(_) => "message_history",
            ServerEventDto::UserJoined(_) => "userJoined",
            ServerEventDto::UserLeft(_) => "userLeft",
            ServerEventDto::UsersList(_) => "usersList",
            ServerEventDto::Message(_) => "message",
            ServerEventDto::UserTyping(_) => "userTyping",
        })
        .collect()
}

pub const TEST_SECRET: &str = "test-secret";

/// Collaborators of the account use cases. bcrypt runs at its minimum cost.
pub struct Accounts {
    pub users: Arc<InMemoryUserRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub clock: Arc<dyn Clock>,
}

impl Accounts {
    pub fn new() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(FIXED_NOW));
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            hasher: Arc::new(BcryptPasswordHasher::new(4)),
            tokens: Arc::new(JwtTokenService::new(TEST_SECRET, 24)),
            clock,
        }
    }

    pub fn register_usecase(&self) -> RegisterUseCase {
        RegisterUseCase::new(
            self.users.clone(),
            self.hasher.clone(),
            self.tokens.clone(),
            self.clock.clone(),
        )
    }

    /// Register an account and return its access token.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> String {
        self.register_usecase()
            .execute(RegisterInput {
                username: Some(username.to_string()),
                email: Some(email.to_string()),
                password: Some(password.to_string()),
            })
            .await
            .unwrap()
    }
}
