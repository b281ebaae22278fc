//! UseCase: typing indicator

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Notification, RoomName};

use super::{
    chat_state::{SharedChatState, log_push_failure},
    error::RelayError,
};

pub struct TypingUseCase {
    state: SharedChatState,
    message_pusher: Arc<dyn MessagePusher>,
}

impl TypingUseCase {
    pub fn new(state: SharedChatState, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            state,
            message_pusher,
        }
    }

    /// Relay a typing indicator to every member of `room` except the sender.
    /// Returns the connections it was sent to.
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room: RoomName,
        is_typing: bool,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let state = self.state.lock().await;

        let session = state
            .sessions
            .get(connection_id)
            .ok_or_else(|| RelayError::NotJoined(connection_id.to_string()))?;

        let targets: Vec<ConnectionId> = state
            .sessions
            .members(&room)
            .into_iter()
            .filter(|id| id != connection_id)
            .collect();

        let notification = Notification::UserTyping {
            user: session.display_name,
            is_typing,
        };
        log_push_failure(
            notification.kind(),
            self.message_pusher
                .broadcast(targets.clone(), &notification)
                .await,
        );

        Ok(targets)
    }
}
