//! InMemory Repository 実装
//!
//! プロセス内の HashMap をストレージとして使用します。再起動で全て失われます。

mod history;
mod session;
mod user;

pub use history::InMemoryHistoryRepository;
pub use session::InMemorySessionRepository;
pub use user::InMemoryUserRepository;
