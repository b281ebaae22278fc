//! UseCase: ルーム一覧・ルーム詳細の取得

use std::collections::BTreeSet;

use crate::domain::{ChatMessage, RoomName, Session};

use super::chat_state::SharedChatState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: RoomName,
    pub participants: usize,
    pub message_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub name: RoomName,
    pub participants: Vec<Session>,
    pub messages: Vec<ChatMessage>,
}

/// Read-only views over the relay state
pub struct RoomQueryUseCase {
    state: SharedChatState,
}

impl RoomQueryUseCase {
    pub fn new(state: SharedChatState) -> Self {
        Self { state }
    }

    /// Rooms that currently have members or retained history, by name.
    pub async fn list(&self) -> Vec<RoomSummary> {
        let state = self.state.lock().await;

        let mut names: BTreeSet<RoomName> = state.history.rooms().into_iter().collect();
        names.extend(state.sessions.snapshot().into_iter().map(|s| s.room));

        names
            .into_iter()
            .map(|name| RoomSummary {
                participants: state.sessions.members(&name).len(),
                message_count: state.history.get(&name).len(),
                name,
            })
            .collect()
    }

    /// `None` if the room has neither members nor history.
    pub async fn detail(&self, name: &RoomName) -> Option<RoomDetail> {
        let state = self.state.lock().await;

        let participants: Vec<Session> = state
            .sessions
            .snapshot()
            .into_iter()
            .filter(|s| &s.room == name)
            .collect();
        let messages = state.history.get(name);
        if participants.is_empty() && messages.is_empty() {
            return None;
        }

        Some(RoomDetail {
            name: name.clone(),
            participants,
            messages,
        })
    }
}
