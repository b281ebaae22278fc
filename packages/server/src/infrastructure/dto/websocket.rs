//! WebSocket event DTOs.
//!
//! Every frame is a JSON object of the form `{"type": <event>, "payload": <data>}`.

use serde::{Deserialize, Serialize};

/// Events sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientEventDto {
    #[serde(rename = "join")]
    Join { username: String },

    #[serde(rename = "join_room")]
    JoinRoom { room: String },

    #[serde(rename = "sendMessage")]
    SendMessage { message: String, room: String },

    #[serde(rename = "typing")]
    Typing {
        room: String,
        #[serde(rename = "isTyping")]
        is_typing: bool,
    },
}

/// Events sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerEventDto {
    #[serde(rename = "message_history")]
    MessageHistory(Vec<ChatMessageDto>),

    #[serde(rename = "userJoined")]
    UserJoined(PresenceNoticeDto),

    #[serde(rename = "userLeft")]
    UserLeft(PresenceNoticeDto),

    #[serde(rename = "usersList")]
    UsersList(Vec<UserEntryDto>),

    #[serde(rename = "message")]
    Message(ChatMessageDto),

    #[serde(rename = "userTyping")]
    UserTyping(TypingDto),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub id: i64,
    pub user: String,
    pub message: String,
    pub room: String,
    /// RFC 3339 (UTC)
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceNoticeDto {
    pub user: String,
    pub message: String,
    /// RFC 3339 (UTC)
    pub timestamp: String,
}

/// Entry of the `usersList` presence snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntryDto {
    pub id: String,
    pub username: String,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingDto {
    pub user: String,
    #[serde(rename = "isTyping")]
    pub is_typing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join() {
        // テスト項目: join イベントが正しくパースされる
        // given (前提条件):
        let json = r#"{"type":"join","payload":{"username":"alice"}}"#;

        // when (操作):
        let event: ClientEventDto = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEventDto::Join {
                username: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_parse_typing_uses_camel_case_flag() {
        // テスト項目: typing イベントの isTyping フィールドが読み取られる
        // given (前提条件):
        let json = r#"{"type":"typing","payload":{"room":"general","isTyping":true}}"#;

        // when (操作):
        let event: ClientEventDto = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEventDto::Typing {
                room: "general".to_string(),
                is_typing: true
            }
        );
    }

    #[test]
    fn test_parse_rejects_missing_fields_and_unknown_types() {
        // テスト項目: 必須フィールドの欠落や未知のイベントはパースエラーになる
        // given (前提条件):
        let missing_room = r#"{"type":"sendMessage","payload":{"message":"hi"}}"#;
        let unknown = r#"{"type":"shout","payload":{}}"#;
        let not_json = "hello";

        // when (操作):
        let results = [missing_room, unknown, not_json]
            .map(|json| serde_json::from_str::<ClientEventDto>(json).is_err());

        // then (期待する結果):
        assert_eq!(results, [true, true, true]);
    }

    #[test]
    fn test_server_event_shape() {
        // テスト項目: サーバーイベントが type / payload 形式でシリアライズされる
        // given (前提条件):
        let event = ServerEventDto::UserTyping(TypingDto {
            user: "alice".to_string(),
            is_typing: false,
        });

        // when (操作):
        let json = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({
                "type": "userTyping",
                "payload": {"user": "alice", "isTyping": false}
            })
        );
    }
}
