//! Shared state of the chat relay.
//!
//! The Presence Index and Room History live behind a single mutex. Every relay
//! use case holds the lock across its mutation and the enqueueing of the
//! broadcasts derived from it, so no broadcast observes a half-applied event.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{HistoryRepository, MessagePushError, SessionRepository};

pub struct ChatState {
    pub sessions: Box<dyn SessionRepository>,
    pub history: Box<dyn HistoryRepository>,
}

pub type SharedChatState = Arc<Mutex<ChatState>>;

impl ChatState {
    pub fn new(
        sessions: Box<dyn SessionRepository>,
        history: Box<dyn HistoryRepository>,
    ) -> Self {
        Self { sessions, history }
    }

    pub fn shared(self) -> SharedChatState {
        Arc::new(Mutex::new(self))
    }
}

/// Delivery is best-effort: failures are logged and never abort the event.
pub(crate) fn log_push_failure(event: &str, result: Result<(), MessagePushError>) {
    if let Err(e) = result {
        tracing::warn!("Failed to deliver '{}': {}", event, e);
    }
}
