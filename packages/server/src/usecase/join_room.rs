//! UseCase: join_room（ルームの移動）

use std::sync::Arc;

use yagura_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, Notification, PresenceNotice, RoomName, Session, Timestamp,
};

use super::{
    chat_state::{SharedChatState, log_push_failure},
    error::RelayError,
};

pub struct JoinRoomUseCase {
    state: SharedChatState,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
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

    /// Move a joined connection to `new_room`.
    ///
    /// Returns the room that was left and the updated session. Broadcasts, in
    /// order: leave notice to the old room, join notice to the new room
    /// (switcher included), the new room's history to the switcher, then
    /// `usersList` to every connection.
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        new_room: RoomName,
    ) -> Result<(RoomName, Session), RelayError> {
        let mut state = self.state.lock().await;

        let (old_room, session) = state
            .sessions
            .change_room(connection_id, new_room.clone())
            .ok_or_else(|| RelayError::NotJoined(connection_id.to_string()))?;
        tracing::info!(
            "Connection '{}' moved from '{}' to '{}'",
            connection_id,
            old_room,
            new_room
        );

        let now = Timestamp::new(self.clock.now_millis());

        let left = Notification::UserLeft(PresenceNotice::left_room(
            session.display_name.clone(),
            now,
        ));
        log_push_failure(
            left.kind(),
            self.message_pusher
                .broadcast(state.sessions.members(&old_room), &left)
                .await,
        );

        let joined = Notification::UserJoined(PresenceNotice::joined_room(
            session.display_name.clone(),
            now,
        ));
        log_push_failure(
            joined.kind(),
            self.message_pusher
                .broadcast(state.sessions.members(&new_room), &joined)
                .await,
        );

        let history = Notification::MessageHistory(state.history.get(&new_room));
        log_push_failure(
            history.kind(),
            self.message_pusher.push_to(connection_id, &history).await,
        );

        let users = Notification::UsersList(state.sessions.snapshot());
        log_push_failure(users.kind(), self.message_pusher.broadcast_all(&users).await);

        Ok((old_room, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::MockMessagePusher,
        infrastructure::dto::websocket::ServerEventDto,
        usecase::{
            join::JoinUseCase,
            testing::{Harness, conn, drain, kinds, name, room},
        },
    };

    async fn joined(harness: &Harness, id: &str, display: &str) {
        JoinUseCase::new(
            harness.state.clone(),
            harness.pusher.clone(),
            harness.clock.clone(),
        )
        .execute(conn(id), name(display))
        .await;
    }

    #[tokio::test]
    async fn test_switch_room_notifies_both_rooms() {
        // テスト項目: ルーム移動で旧ルームに退出通知、新ルームに参加通知が届く
        // given (前提条件):
        let harness = Harness::new();
        let (c1, mut rx1) = harness.connect("c1").await;
        let (_c2, mut rx2) = harness.connect("c2").await;
        joined(&harness, "c1", "alice").await;
        joined(&harness, "c2", "bob").await;
        drain(&mut rx1);
        drain(&mut rx2);
        let usecase = JoinRoomUseCase::new(
            harness.state.clone(),
            harness.pusher.clone(),
            harness.clock.clone(),
        );

        // when (操作):
        let (old_room, session) = usecase.execute(&c1, room("crypt")).await.unwrap();

        // then (期待する結果):
        assert_eq!(old_room.as_str(), "general");
        assert_eq!(session.room.as_str(), "crypt");

        let alice_events = drain(&mut rx1);
        assert_eq!(
            kinds(&alice_events),
            vec!["userJoined", "message_history", "usersList"]
        );
        match &alice_events[0] {
            ServerEventDto::UserJoined(notice) => {
                assert_eq!(notice.message, "alice has joined the room");
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let bob_events = drain(&mut rx2);
        assert_eq!(kinds(&bob_events), vec!["userLeft", "usersList"]);
        match &bob_events[0] {
            ServerEventDto::UserLeft(notice) => {
                assert_eq!(notice.user, "alice");
                assert_eq!(notice.message, "alice has left the room");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_switch_room_updates_presence() {
        // テスト項目: 移動後の参加者一覧とルームメンバーが更新されている
        // given (前提条件):
        let harness = Harness::new();
        let (c1, _rx1) = harness.connect("c1").await;
        joined(&harness, "c1", "alice").await;
        let usecase = JoinRoomUseCase::new(
            harness.state.clone(),
            harness.pusher.clone(),
            harness.clock.clone(),
        );

        // when (操作):
        usecase.execute(&c1, room("crypt")).await.unwrap();

        // then (期待する結果):
        let state = harness.state.lock().await;
        assert!(state.sessions.members(&room("general")).is_empty());
        assert_eq!(state.sessions.members(&room("crypt")), vec![c1.clone()]);
    }

    #[tokio::test]
    async fn test_switch_room_without_session_is_noop() {
        // テスト項目: 未 join の接続によるルーム移動は何も送信せずエラーになる
        // given (前提条件):
        let harness = Harness::new();
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().times(0);
        pusher.expect_broadcast_all().times(0);
        pusher.expect_push_to().times(0);
        let usecase =
            JoinRoomUseCase::new(harness.state.clone(), Arc::new(pusher), harness.clock.clone());

        // when (操作):
        let result = usecase.execute(&conn("ghost"), room("crypt")).await;

        // then (期待する結果):
        assert_eq!(result, Err(RelayError::NotJoined("ghost".to_string())));
    }
}
