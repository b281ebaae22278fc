//! Conversion logic between DTOs and domain types.

use yagura_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    ChatMessage, ClientEvent, DisplayName, MessageBody, Notification, Page, PresenceNotice,
    RoomName, Session, UserAccount, ValueObjectError,
};
use crate::infrastructure::dto::{http, websocket as ws};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<ws::ClientEventDto> for ClientEvent {
    type Error = ValueObjectError;

    fn try_from(dto: ws::ClientEventDto) -> Result<Self, Self::Error> {
        Ok(match dto {
            ws::ClientEventDto::Join { username } => ClientEvent::Join {
                display_name: DisplayName::new(username)?,
            },
            ws::ClientEventDto::JoinRoom { room } => ClientEvent::JoinRoom {
                room: RoomName::new(room)?,
            },
            ws::ClientEventDto::SendMessage { message, room } => ClientEvent::SendMessage {
                body: MessageBody::new(message)?,
                room: RoomName::new(room)?,
            },
            ws::ClientEventDto::Typing { room, is_typing } => ClientEvent::Typing {
                room: RoomName::new(room)?,
                is_typing,
            },
        })
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&ChatMessage> for ws::ChatMessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            id: model.id.value(),
            user: model.author.as_str().to_string(),
            message: model.body.as_str().to_string(),
            room: model.room.as_str().to_string(),
            timestamp: timestamp_to_rfc3339(model.sent_at.value()),
        }
    }
}

impl From<&PresenceNotice> for ws::PresenceNoticeDto {
    fn from(model: &PresenceNotice) -> Self {
        Self {
            user: model.user.as_str().to_string(),
            message: model.text.clone(),
            timestamp: timestamp_to_rfc3339(model.at.value()),
        }
    }
}

impl From<&Session> for ws::UserEntryDto {
    fn from(model: &Session) -> Self {
        Self {
            id: model.connection_id.as_str().to_string(),
            username: model.display_name.as_str().to_string(),
            room: model.room.as_str().to_string(),
        }
    }
}

impl From<&Session> for http::ParticipantDto {
    fn from(model: &Session) -> Self {
        Self {
            id: model.connection_id.as_str().to_string(),
            username: model.display_name.as_str().to_string(),
        }
    }
}

impl From<&Notification> for ws::ServerEventDto {
    fn from(model: &Notification) -> Self {
        match model {
            Notification::MessageHistory(messages) => {
                Self::MessageHistory(messages.iter().map(Into::into).collect())
            }
            Notification::UserJoined(notice) => Self::UserJoined(notice.into()),
            Notification::UserLeft(notice) => Self::UserLeft(notice.into()),
            Notification::UsersList(sessions) => {
                Self::UsersList(sessions.iter().map(Into::into).collect())
            }
            Notification::Message(message) => Self::Message(message.into()),
            Notification::UserTyping { user, is_typing } => Self::UserTyping(ws::TypingDto {
                user: user.as_str().to_string(),
                is_typing: *is_typing,
            }),
        }
    }
}

impl From<&UserAccount> for http::UserDto {
    fn from(model: &UserAccount) -> Self {
        Self {
            id: model.id.to_string(),
            username: model.username.as_str().to_string(),
            email: model.email.as_str().to_string(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

impl From<&UserAccount> for http::PublicUserDto {
    fn from(model: &UserAccount) -> Self {
        Self {
            id: model.id.to_string(),
            username: model.username.as_str().to_string(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

impl<T> From<&Page<T>> for http::PaginationDto {
    fn from(page: &Page<T>) -> Self {
        Self {
            current_page: page.page,
            total_pages: page.total_pages(),
            total_items: page.total_items,
            has_next_page: page.has_next_page(),
            has_prev_page: page.has_prev_page(),
        }
    }
}
