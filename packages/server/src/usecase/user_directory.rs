//! UseCase: 他ユーザーの参照・検索

use std::sync::Arc;

use crate::domain::{Page, UserAccount, UserId, UserRepository};

use super::error::{AccountError, Violations};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

pub struct UserDirectoryUseCase {
    users: Arc<dyn UserRepository>,
}

impl UserDirectoryUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Look up a user by the string form of its id. Malformed ids are reported
    /// as not found.
    pub async fn get_user(&self, id: &str) -> Result<UserAccount, AccountError> {
        let id = UserId::parse(id).map_err(|_| AccountError::UserNotFound)?;
        self.users
            .find_by_id(&id)
            .await
            .ok_or(AccountError::UserNotFound)
    }

    /// Case-insensitive username search. A missing query matches every user.
    pub async fn search(
        &self,
        query: Option<String>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Page<UserAccount>, AccountError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        let mut violations = Violations::new();
        if page < 1 {
            violations.add("page", "page must be at least 1");
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            violations.add("limit", format!("limit must be between 1 and {}", MAX_LIMIT));
        }
        if !violations.is_empty() {
            return Err(violations.into_error());
        }

        let query = query.unwrap_or_default();
        Ok(self
            .users
            .search_by_username(query.trim(), page, limit)
            .await)
    }
}
