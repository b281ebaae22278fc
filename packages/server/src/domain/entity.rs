//! Domain entities.

use serde::{Deserialize, Serialize};

use super::value_object::{
    ConnectionId, DisplayName, Email, MessageBody, MessageId, RoomName, Timestamp, UserId,
    Username,
};

/// Room every connection lands in on its first join.
pub const DEFAULT_ROOM: &str = "general";

/// Number of messages retained per room.
pub const MAX_MESSAGES_PER_ROOM: usize = 50;

/// Lifetime of a password reset token.
pub const PASSWORD_RESET_TTL_MILLIS: i64 = 60 * 60 * 1000;

/// Presence state of a joined connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
    pub room: RoomName,
}

impl Session {
    pub fn new(connection_id: ConnectionId, display_name: DisplayName, room: RoomName) -> Self {
        Self {
            connection_id,
            display_name,
            room,
        }
    }
}

/// A chat message as stored in a room's history.
///
/// `author` is a snapshot of the sender's display name at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: DisplayName,
    pub body: MessageBody,
    pub room: RoomName,
    pub sent_at: Timestamp,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        author: DisplayName,
        body: MessageBody,
        room: RoomName,
        sent_at: Timestamp,
    ) -> Self {
        Self {
            id,
            author,
            body,
            room,
            sent_at,
        }
    }
}

/// Registered account. `password_hash` and the reset token never leave the
/// server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub password_hash: String,
    /// Outstanding password reset token; only the latest one is honoured.
    pub reset_token: Option<String>,
    pub reset_token_expiry: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserAccount {
    /// Whether `token` is the outstanding reset token and has not expired at `now`.
    pub fn accepts_reset_token(&self, token: &str, now: Timestamp) -> bool {
        self.reset_token.as_deref() == Some(token)
            && self.reset_token_expiry.is_some_and(|expiry| expiry > now)
    }
}

/// A page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        self.total_items.div_ceil(self.limit as usize) as u32
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }
}
