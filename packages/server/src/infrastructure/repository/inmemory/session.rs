//! InMemory Session Registry 実装

use std::collections::HashMap;

use crate::domain::{ConnectionId, DisplayName, RoomName, Session, SessionRepository};

/// インメモリ Session Registry
///
/// Key: connection id / Value: Session
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: HashMap<ConnectionId, Session>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn register(
        &mut self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        room: RoomName,
    ) -> Session {
        let session = Session::new(connection_id.clone(), display_name, room);
        if let Some(previous) = self.sessions.insert(connection_id, session.clone()) {
            tracing::debug!(
                "Session '{}' re-registered, replacing '{}' in '{}'",
                previous.connection_id,
                previous.display_name,
                previous.room
            );
        }
        session
    }

    fn change_room(
        &mut self,
        connection_id: &ConnectionId,
        new_room: RoomName,
    ) -> Option<(RoomName, Session)> {
        let session = self.sessions.get_mut(connection_id)?;
        let old_room = std::mem::replace(&mut session.room, new_room);
        Some((old_room, session.clone()))
    }

    fn remove(&mut self, connection_id: &ConnectionId) -> Option<Session> {
        self.sessions.remove(connection_id)
    }

    fn get(&self, connection_id: &ConnectionId) -> Option<Session> {
        self.sessions.get(connection_id).cloned()
    }

    fn snapshot(&self) -> Vec<Session> {
        let mut sessions: Vec<Session> = self.sessions.values().cloned().collect();

        // Sort by connection id for consistent ordering
        sessions.sort_by(|a, b| a.connection_id.cmp(&b.connection_id));

        sessions
    }

    fn members(&self, room: &RoomName) -> Vec<ConnectionId> {
        let mut members: Vec<ConnectionId> = self
            .sessions
            .values()
            .filter(|session| &session.room == room)
            .map(|session| session.connection_id.clone())
            .collect();
        members.sort();
        members
    }
}
