//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 履歴への追加と、宛先ルームのメンバー（送信者を含む）へのブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加中のルームへの送信
//! - エッジケース：別ルームのメンバーには届かない、未 join の接続からの送信

use std::sync::Arc;

use yagura_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessageBody, MessageIdFactory, MessagePusher, Notification,
    RoomName, Timestamp,
};

use super::{
    chat_state::{SharedChatState, log_push_failure},
    error::RelayError,
};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    state: SharedChatState,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    ids: MessageIdFactory,
}

impl SendMessageUseCase {
    pub fn new(
        state: SharedChatState,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state,
            message_pusher,
            clock,
            ids: MessageIdFactory::new(),
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信者の接続 ID
    /// * `body` - トリム済みのメッセージ本文
    /// * `room` - 宛先ルーム（送信者の現在のルームとは限らない）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 履歴に追加されたメッセージ
    /// * `Err(RelayError)` - 送信者が未 join
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        body: MessageBody,
        room: RoomName,
    ) -> Result<ChatMessage, RelayError> {
        let mut state = self.state.lock().await;

        let session = state
            .sessions
            .get(connection_id)
            .ok_or_else(|| RelayError::NotJoined(connection_id.to_string()))?;

        let now = self.clock.now_millis();
        let message = ChatMessage::new(
            self.ids.next(now),
            session.display_name,
            body,
            room.clone(),
            Timestamp::new(now),
        );

        // 1. 履歴に追加
        state.history.append(message.clone());
        tracing::debug!(
            "Message {} from '{}' appended to '{}'",
            message.id.value(),
            connection_id,
            room
        );

        // 2. ルームのメンバー（送信者を含む）にブロードキャスト
        let notification = Notification::Message(message.clone());
        log_push_failure(
            notification.kind(),
            self.message_pusher
                .broadcast(state.sessions.members(&room), &notification)
                .await,
        );

        Ok(message)
    }
}
