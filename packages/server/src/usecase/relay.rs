//! Presence/Chat Relay
//!
//! Dispatches validated client events to the relay use cases. One instance is
//! shared by every WebSocket connection.

use std::sync::Arc;

use yagura_shared::time::Clock;

use crate::domain::{ClientEvent, ConnectionId, MessagePusher, Session};

use super::{
    chat_state::SharedChatState, disconnect::DisconnectUseCase, error::RelayError,
    join::JoinUseCase, join_room::JoinRoomUseCase, send_message::SendMessageUseCase,
    typing::TypingUseCase,
};

pub struct ChatRelay {
    join: JoinUseCase,
    join_room: JoinRoomUseCase,
    send_message: SendMessageUseCase,
    typing: TypingUseCase,
    disconnect: DisconnectUseCase,
}

impl ChatRelay {
    pub fn new(
        state: SharedChatState,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            join: JoinUseCase::new(state.clone(), message_pusher.clone(), clock.clone()),
            join_room: JoinRoomUseCase::new(state.clone(), message_pusher.clone(), clock.clone()),
            send_message: SendMessageUseCase::new(
                state.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            typing: TypingUseCase::new(state.clone(), message_pusher.clone()),
            disconnect: DisconnectUseCase::new(state, message_pusher, clock),
        }
    }

    /// Apply one event from `connection_id`.
    ///
    /// Events from a single connection must be passed in arrival order.
    pub async fn handle(
        &self,
        connection_id: &ConnectionId,
        event: ClientEvent,
    ) -> Result<(), RelayError> {
        match event {
            ClientEvent::Join { display_name } => {
                self.join.execute(connection_id.clone(), display_name).await;
            }
            ClientEvent::JoinRoom { room } => {
                self.join_room.execute(connection_id, room).await?;
            }
            ClientEvent::SendMessage { body, room } => {
                self.send_message.execute(connection_id, body, room).await?;
            }
            ClientEvent::Typing { room, is_typing } => {
                self.typing.execute(connection_id, room, is_typing).await?;
            }
        }
        Ok(())
    }

    pub async fn disconnect(&self, connection_id: &ConnectionId) -> Option<Session> {
        self.disconnect.execute(connection_id).await
    }
}
