//! Outbound notifications produced by the relay.
//!
//! Notifications are protocol-agnostic; the message pusher decides how they
//! are encoded on the wire.

use super::{
    entity::{ChatMessage, Session},
    value_object::{DisplayName, Timestamp},
};

/// A join or leave announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceNotice {
    pub user: DisplayName,
    pub text: String,
    pub at: Timestamp,
}

impl PresenceNotice {
    pub fn joined_chat(user: DisplayName, at: Timestamp) -> Self {
        let text = format!("{} has joined the chat", user);
        Self { user, text, at }
    }

    pub fn joined_room(user: DisplayName, at: Timestamp) -> Self {
        let text = format!("{} has joined the room", user);
        Self { user, text, at }
    }

    pub fn left_room(user: DisplayName, at: Timestamp) -> Self {
        let text = format!("{} has left the room", user);
        Self { user, text, at }
    }

    pub fn left_chat(user: DisplayName, at: Timestamp) -> Self {
        let text = format!("{} has left the chat", user);
        Self { user, text, at }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Replay of a room's retained messages, oldest first
    MessageHistory(Vec<ChatMessage>),
    UserJoined(PresenceNotice),
    UserLeft(PresenceNotice),
    /// Full presence snapshot
    UsersList(Vec<Session>),
    Message(ChatMessage),
    UserTyping { user: DisplayName, is_typing: bool },
}

impl Notification {
    /// Event name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MessageHistory(_) => "message_history",
            Self::UserJoined(_) => "userJoined",
            Self::UserLeft(_) => "userLeft",
            Self::UsersList(_) => "usersList",
            Self::Message(_) => "message",
            Self::UserTyping { .. } => "userTyping",
        }
    }
}
