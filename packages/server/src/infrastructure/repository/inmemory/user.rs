//! InMemory User Repository 実装
//!
//! ドメイン層が定義する UserRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Email, Page, RepositoryError, UserAccount, UserId, UserRepository, Username,
};

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Check uniqueness of username and e-mail against every account except `id`.
fn ensure_unique(
    users: &HashMap<UserId, UserAccount>,
    account: &UserAccount,
) -> Result<(), RepositoryError> {
    for other in users.values().filter(|other| other.id != account.id) {
        if other.username.as_str().eq_ignore_ascii_case(account.username.as_str()) {
            return Err(RepositoryError::DuplicateUsername(
                account.username.to_string(),
            ));
        }
        if other.email == account.email {
            return Err(RepositoryError::DuplicateEmail(account.email.to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, account: UserAccount) -> Result<UserAccount, RepositoryError> {
        let mut users = self.users.lock().await;
        ensure_unique(&users, &account)?;
        users.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &UserId) -> Option<UserAccount> {
        self.users.lock().await.get(id).cloned()
    }

    async fn find_by_email(&self, email: &Email) -> Option<UserAccount> {
        let users = self.users.lock().await;
        users.values().find(|user| &user.email == email).cloned()
    }

    async fn find_by_username(&self, username: &Username) -> Option<UserAccount> {
        let users = self.users.lock().await;
        users
            .values()
            .find(|user| user.username.as_str().eq_ignore_ascii_case(username.as_str()))
            .cloned()
    }

    async fn update(&self, account: UserAccount) -> Result<UserAccount, RepositoryError> {
        let mut users = self.users.lock().await;
        if !users.contains_key(&account.id) {
            return Err(RepositoryError::UserNotFound(account.id.to_string()));
        }
        ensure_unique(&users, &account)?;
        users.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().await;
        users
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::UserNotFound(id.to_string()))
    }

    async fn search_by_username(&self, query: &str, page: u32, limit: u32) -> Page<UserAccount> {
        let needle = query.to_lowercase();
        let users = self.users.lock().await;

        let mut matches: Vec<UserAccount> = users
            .values()
            .filter(|user| user.username.as_str().to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by_cached_key(|user| user.username.as_str().to_lowercase());

        let total_items = matches.len();
        let offset = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
        let items = matches
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect();

        Page {
            items,
            page,
            limit,
            total_items,
        }
    }
}
