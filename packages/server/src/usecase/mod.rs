//! UseCase 層
//!
//! リレー（join / join_room / sendMessage / typing / disconnect）と
//! アカウント管理のアプリケーションロジックを提供します。
//! ドメイン層の trait にのみ依存し、具体的な実装は UI 層で注入されます。

pub mod chat_state;
pub mod disconnect;
pub mod error;
pub mod join;
pub mod join_room;
pub mod login;
pub mod movies;
pub mod password_reset;
pub mod profile;
pub mod register;
pub mod relay;
pub mod rooms;
pub mod send_message;
pub mod typing;
pub mod user_directory;

#[cfg(test)]
pub(crate) mod testing;

pub use chat_state::{ChatState, SharedChatState};
pub use disconnect::DisconnectUseCase;
pub use error::{AccountError, FieldViolation, RelayError};
pub use join::JoinUseCase;
pub use join_room::JoinRoomUseCase;
pub use login::LoginUseCase;
pub use movies::HorrorMoviesUseCase;
pub use password_reset::PasswordResetUseCase;
pub use profile::{ProfileUseCase, UpdateProfileInput};
pub use register::{RegisterInput, RegisterUseCase};
pub use relay::ChatRelay;
pub use rooms::{RoomDetail, RoomQueryUseCase, RoomSummary};
pub use send_message::SendMessageUseCase;
pub use typing::TypingUseCase;
pub use user_directory::UserDirectoryUseCase;
