//! Identifier factories.

use std::sync::atomic::{AtomicI64, Ordering};

use uuid::Uuid;

use super::value_object::{ConnectionId, MessageId};

pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        // a UUID string is never empty
        ConnectionId::new(Uuid::new_v4().to_string())
            .unwrap_or_else(|_| unreachable!("uuid strings are non-empty"))
    }
}

/// Issues message ids derived from the clock.
///
/// Ids are the current time in milliseconds, bumped past the last issued id
/// when two messages arrive within the same millisecond or the clock steps back.
#[derive(Debug, Default)]
pub struct MessageIdFactory {
    last: AtomicI64,
}

impl MessageIdFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, now_millis: i64) -> MessageId {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_millis.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        MessageId::new(now_millis.max(previous + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_follow_the_clock() {
        // テスト項目: 時刻が進んでいる場合は時刻がそのまま ID になる
        // given (前提条件):
        let factory = MessageIdFactory::new();

        // when (操作):
        let first = factory.next(1000);
        let second = factory.next(2000);

        // then (期待する結果):
        assert_eq!(first.value(), 1000);
        assert_eq!(second.value(), 2000);
    }

    #[test]
    fn test_message_ids_are_unique_within_same_millisecond() {
        // テスト項目: 同一ミリ秒や時刻の巻き戻りでも ID は単調増加する
        // given (前提条件):
        let factory = MessageIdFactory::new();

        // when (操作):
        let a = factory.next(1000);
        let b = factory.next(1000);
        let c = factory.next(900);

        // then (期待する結果):
        assert_eq!(a.value(), 1000);
        assert_eq!(b.value(), 1001);
        assert_eq!(c.value(), 1002);
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 接続 ID は毎回異なる値が生成される
        // given (前提条件):

        // when (操作):
        let a = ConnectionIdFactory::generate();
        let b = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }
}
