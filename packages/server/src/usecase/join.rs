//! UseCase: join（チャットへの参加）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinUseCase::execute() メソッド
//! - デフォルトルームへの登録と、履歴・参加通知・参加者一覧の配信順序
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回参加、既存メッセージのあるルームへの参加
//! - エッジケース：同じ接続からの再 join（上書き）、未 join の接続への参加者一覧配信

use std::sync::Arc;

use yagura_shared::time::Clock;

use crate::domain::{
    ConnectionId, DisplayName, MessagePusher, Notification, PresenceNotice, RoomName, Session,
    Timestamp,
};

use super::chat_state::{SharedChatState, log_push_failure};

/// join のユースケース
pub struct JoinUseCase {
    state: SharedChatState,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinUseCase {
    pub fn new(
        state: SharedChatState,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state,
            message_pusher,
            clock,
        }
    }

    /// Register the connection in the default room and announce it.
    ///
    /// Broadcasts, in order:
    /// 1. the joiner receives the default room's history
    /// 2. the default room (joiner included) receives `userJoined`
    /// 3. every connection receives `usersList`
    ///
    /// A connection that has already joined is re-registered from scratch.
    pub async fn execute(&self, connection_id: ConnectionId, display_name: DisplayName) -> Session {
        let room = RoomName::default_room();
        let mut state = self.state.lock().await;

        let session = state
            .sessions
            .register(connection_id.clone(), display_name, room.clone());
        tracing::info!(
            "Connection '{}' joined '{}' as '{}'",
            connection_id,
            room,
            session.display_name
        );

        // 1. 参加者本人にルームの履歴を送信
        let history = Notification::MessageHistory(state.history.get(&room));
        log_push_failure(
            history.kind(),
            self.message_pusher.push_to(&connection_id, &history).await,
        );

        // 2. ルーム全体（本人を含む）に参加通知
        let joined = Notification::UserJoined(PresenceNotice::joined_chat(
            session.display_name.clone(),
            Timestamp::new(self.clock.now_millis()),
        ));
        log_push_failure(
            joined.kind(),
            self.message_pusher
                .broadcast(state.sessions.members(&room), &joined)
                .await,
        );

        // 3. 全接続に参加者一覧
        let users = Notification::UsersList(state.sessions.snapshot());
        log_push_failure(users.kind(), self.message_pusher.broadcast_all(&users).await);

        session
    }
}
