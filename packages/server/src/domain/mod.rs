//! Domain layer: entities, value objects and the interfaces the use cases
//! depend on.

pub mod catalog;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod notification;
pub mod pusher;
pub mod repository;
pub mod service;
pub mod value_object;

pub use catalog::MovieCatalog;
#[cfg(test)]
pub use catalog::MockMovieCatalog;
pub use entity::{
    ChatMessage, DEFAULT_ROOM, MAX_MESSAGES_PER_ROOM, PASSWORD_RESET_TTL_MILLIS, Page, Session,
    UserAccount,
};
pub use event::ClientEvent;
pub use error::{
    CatalogError, MessagePushError, PasswordError, RepositoryError, TokenError, ValueObjectError,
};
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use notification::{Notification, PresenceNotice};
pub use pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use pusher::MockMessagePusher;
pub use repository::{HistoryRepository, SessionRepository, UserRepository};
pub use service::{Identity, PasswordHasher, TokenService};
pub use value_object::{
    ConnectionId, DisplayName, Email, MessageBody, MessageId, Password, RoomName, Timestamp,
    UserId, Username,
};
