//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 同期 / 非同期
//!
//! - `SessionRepository` と `HistoryRepository` は同期 trait です。
//!   リレーは 1 イベントの更新とブロードキャスト対象の列挙を 1 つのロック内で
//!   行うため、ロックの外側（`ChatState`）で排他制御します。
//! - `UserRepository` は将来 DB 実装に差し替えることを想定した非同期 trait です。

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, Page, Session, UserAccount},
    error::RepositoryError,
    value_object::{ConnectionId, DisplayName, Email, RoomName, UserId, Username},
};

/// Session Registry
///
/// 接続 ID からプレゼンス情報（表示名・現在のルーム）へのマッピング。
pub trait SessionRepository: Send + Sync {
    /// Register a session in `room`, replacing any existing record for the
    /// same connection.
    fn register(
        &mut self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        room: RoomName,
    ) -> Session;

    /// Move a session to `new_room`. Returns the previous room and the updated
    /// session, or `None` if the connection has not joined.
    fn change_room(
        &mut self,
        connection_id: &ConnectionId,
        new_room: RoomName,
    ) -> Option<(RoomName, Session)>;

    /// Remove a session, returning it if it existed.
    fn remove(&mut self, connection_id: &ConnectionId) -> Option<Session>;

    fn get(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// All sessions, sorted by connection id.
    fn snapshot(&self) -> Vec<Session>;

    /// Connections currently in `room`.
    fn members(&self, room: &RoomName) -> Vec<ConnectionId>;
}

/// Room History Buffer
///
/// ルームごとの直近メッセージを保持する有界 FIFO。
pub trait HistoryRepository: Send + Sync {
    /// Append to the tail of the room's history, evicting the oldest entries
    /// beyond capacity.
    fn append(&mut self, message: ChatMessage);

    /// Current contents of a room's history, oldest first.
    fn get(&self, room: &RoomName) -> Vec<ChatMessage>;

    /// Rooms that have received at least one message.
    fn rooms(&self) -> Vec<RoomName>;
}

/// User store
///
/// アカウント情報の永続化を抽象化します。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails if the username or e-mail is taken.
    async fn create(&self, account: UserAccount) -> Result<UserAccount, RepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Option<UserAccount>;

    async fn find_by_email(&self, email: &Email) -> Option<UserAccount>;

    async fn find_by_username(&self, username: &Username) -> Option<UserAccount>;

    /// Replace an existing account. Uniqueness is re-checked against other accounts.
    async fn update(&self, account: UserAccount) -> Result<UserAccount, RepositoryError>;

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError>;

    /// Case-insensitive substring search on username, ordered by username.
    async fn search_by_username(&self, query: &str, page: u32, limit: u32) -> Page<UserAccount>;
}
