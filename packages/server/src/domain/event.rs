//! Inbound events accepted by the relay, already validated into value objects.

use super::value_object::{DisplayName, MessageBody, RoomName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Join { display_name: DisplayName },
    JoinRoom { room: RoomName },
    SendMessage { body: MessageBody, room: RoomName },
    Typing { room: RoomName, is_typing: bool },
}

impl ClientEvent {
    /// Event name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::JoinRoom { .. } => "join_room",
            Self::SendMessage { .. } => "sendMessage",
            Self::Typing { .. } => "typing",
        }
    }
}
