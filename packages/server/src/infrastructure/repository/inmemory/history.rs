//! InMemory Room History 実装
//!
//! ルームごとに `VecDeque` を持ち、容量を超えた分は先頭（最古）から捨てます。

use std::collections::{HashMap, VecDeque};

use crate::domain::{ChatMessage, HistoryRepository, MAX_MESSAGES_PER_ROOM, RoomName};

#[derive(Debug)]
pub struct InMemoryHistoryRepository {
    rooms: HashMap<RoomName, VecDeque<ChatMessage>>,
    capacity: usize,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::with_capacity(MAX_MESSAGES_PER_ROOM)
    }

    /// Create a history buffer retaining `capacity` messages per room.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rooms: HashMap::new(),
            capacity,
        }
    }
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryRepository for InMemoryHistoryRepository {
    fn append(&mut self, message: ChatMessage) {
        let capacity = self.capacity;
        let buffer = self
            .rooms
            .entry(message.room.clone())
            .or_insert_with(|| VecDeque::with_capacity(capacity));
        buffer.push_back(message);
        while buffer.len() > capacity {
            buffer.pop_front();
        }
    }

    fn get(&self, room: &RoomName) -> Vec<ChatMessage> {
        self.rooms
            .get(room)
            .map(|buffer| buffer.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn rooms(&self) -> Vec<RoomName> {
        let mut rooms: Vec<RoomName> = self.rooms.keys().cloned().collect();
        rooms.sort();
        rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, MessageBody, MessageId, Timestamp};

    fn room(value: &str) -> RoomName {
        RoomName::new(value.to_string()).unwrap()
    }

    fn message(id: i64, room_name: &str) -> ChatMessage {
        ChatMessage::new(
            MessageId::new(id),
            DisplayName::new("alice".to_string()).unwrap(),
            MessageBody::new(format!("message {}", id)).unwrap(),
            room(room_name),
            Timestamp::new(id),
        )
    }

    #[test]
    fn test_get_unknown_room_is_empty() {
        // テスト項目: メッセージのないルームの履歴は空で、ルームも作成されない
        // given (前提条件):
        let repo = InMemoryHistoryRepository::new();

        // when (操作):
        let history = repo.get(&room("general"));

        // then (期待する結果):
        assert!(history.is_empty());
        assert!(repo.rooms().is_empty());
    }

    #[test]
    fn test_append_keeps_arrival_order() {
        // テスト項目: 追加順（到着順）に履歴が保持される
        // given (前提条件):
        let mut repo = InMemoryHistoryRepository::new();

        // when (操作):
        repo.append(message(1, "general"));
        repo.append(message(2, "general"));
        repo.append(message(3, "other"));

        // then (期待する結果):
        let ids: Vec<i64> = repo
            .get(&room("general"))
            .iter()
            .map(|m| m.id.value())
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(repo.rooms(), vec![room("general"), room("other")]);
    }

    #[test]
    fn test_fifty_one_messages_evict_the_first() {
        // テスト項目: 51 件追加すると最古の 1 件が捨てられ、直近 50 件が残る
        // given (前提条件):
        let mut repo = InMemoryHistoryRepository::new();

        // when (操作):
        for id in 1..=51 {
            repo.append(message(id, "general"));
        }

        // then (期待する結果):
        let history = repo.get(&room("general"));
        assert_eq!(history.len(), MAX_MESSAGES_PER_ROOM);
        assert_eq!(history.first().unwrap().id.value(), 2);
        assert_eq!(history.last().unwrap().id.value(), 51);
    }

    #[test]
    fn test_capacity_holds_for_many_appends() {
        // テスト項目: 任意回数の追加後も容量を超えず、最新のメッセージが残る
        // given (前提条件):
        let mut repo = InMemoryHistoryRepository::with_capacity(3);

        // when (操作):
        for id in 1..=10 {
            repo.append(message(id, "general"));
            assert!(repo.get(&room("general")).len() <= 3);
        }

        // then (期待する結果):
        let ids: Vec<i64> = repo
            .get(&room("general"))
            .iter()
            .map(|m| m.id.value())
            .collect();
        assert_eq!(ids, vec![8, 9, 10]);
    }
}
