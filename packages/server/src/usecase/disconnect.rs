//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//! - セッションの削除と、最後のルームへの退出通知・全接続への参加者一覧
//!
//! ### どのような状況を想定しているか
//! - 正常系：join 済み接続の切断
//! - エッジケース：未 join の接続の切断（何もしない）、同じ接続の二重切断

use std::sync::Arc;

use yagura_shared::time::Clock;

use crate::domain::{ConnectionId, MessagePusher, Notification, PresenceNotice, Session, Timestamp};

use super::chat_state::{SharedChatState, log_push_failure};

/// 切断のユースケース
pub struct DisconnectUseCase {
    state: SharedChatState,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl DisconnectUseCase {
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

    /// Remove the session of a closed connection.
    ///
    /// The caller unregisters the connection from the message pusher first,
    /// so the departing connection receives nothing. Returns `None` (and
    /// broadcasts nothing) if the connection never joined.
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Session> {
        let mut state = self.state.lock().await;

        let Some(session) = state.sessions.remove(connection_id) else {
            tracing::debug!("Connection '{}' closed without joining", connection_id);
            return None;
        };
        tracing::info!(
            "Connection '{}' ('{}') left from '{}'",
            connection_id,
            session.display_name,
            session.room
        );

        // 1. 最後にいたルームに退出通知
        let left = Notification::UserLeft(PresenceNotice::left_chat(
            session.display_name.clone(),
            Timestamp::new(self.clock.now_millis()),
        ));
        log_push_failure(
            left.kind(),
            self.message_pusher
                .broadcast(state.sessions.members(&session.room), &left)
                .await,
        );

        // 2. 全接続に参加者一覧
        let users = Notification::UsersList(state.sessions.snapshot());
        log_push_failure(users.kind(), self.message_pusher.broadcast_all(&users).await);

        Some(session)
    }
}
