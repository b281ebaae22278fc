//! UseCase: 自分のプロフィールの取得・更新・削除
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ProfileUseCase の get / update / delete
//!
//! ### どのような状況を想定しているか
//! - 正常系：ユーザー名・メールアドレス・パスワードの更新、アカウント削除
//! - 異常系：現在のパスワードなし・誤りでのパスワード変更、誤ったパスワードでの削除
//! - エッジケース：削除済みアカウントのプロフィール取得、他ユーザーとの重複

use std::sync::Arc;

use yagura_shared::time::Clock;

use crate::domain::{
    Email, Password, PasswordHasher, Timestamp, UserAccount, UserId, UserRepository, Username,
};

use super::error::{AccountError, Violations};

/// Requested profile changes. Absent or blank fields are left unchanged.
#[derive(Debug, Default, Clone)]
pub struct UpdateProfileInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub struct ProfileUseCase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ProfileUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    pub async fn get(&self, id: &UserId) -> Result<UserAccount, AccountError> {
        self.users
            .find_by_id(id)
            .await
            .ok_or(AccountError::UserNotFound)
    }

    /// Apply profile changes.
    ///
    /// Setting a new password requires the current one.
    pub async fn update(
        &self,
        id: &UserId,
        input: UpdateProfileInput,
    ) -> Result<UserAccount, AccountError> {
        let mut account = self.get(id).await?;

        let mut violations = Violations::new();
        let username = provided(input.username)
            .and_then(|v| violations.check("username", Username::new(v)));
        let email = provided(input.email).and_then(|v| violations.check("email", Email::new(v)));
        let new_password = provided(input.new_password)
            .and_then(|v| violations.check("newPassword", Password::new(v)));
        if !violations.is_empty() {
            return Err(violations.into_error());
        }

        if let Some(new_password) = new_password {
            let Some(current_password) = provided(input.current_password) else {
                let mut violations = Violations::new();
                violations.add(
                    "currentPassword",
                    "Current password is required to set new password",
                );
                return Err(violations.into_error());
            };
            if !self
                .hasher
                .verify(&current_password, &account.password_hash)
                .await?
            {
                return Err(AccountError::IncorrectPassword(
                    "Current password is incorrect",
                ));
            }
            account.password_hash = self.hasher.hash(&new_password).await?;
        }
        if let Some(username) = username {
            account.username = username;
        }
        if let Some(email) = email {
            account.email = email;
        }
        account.updated_at = Timestamp::new(self.clock.now_millis());

        let account = self.users.update(account).await?;
        tracing::info!("Updated profile of '{}'", account.id);
        Ok(account)
    }

    /// Delete the account after confirming its password.
    pub async fn delete(&self, id: &UserId, password: Option<String>) -> Result<(), AccountError> {
        let account = self.get(id).await?;

        let mut violations = Violations::new();
        let Some(password) = violations.require("password", password) else {
            return Err(violations.into_error());
        };
        if !self.hasher.verify(&password, &account.password_hash).await? {
            return Err(AccountError::IncorrectPassword("Invalid password"));
        }

        self.users.delete(id).await?;
        tracing::info!("Deleted account '{}'", id);
        Ok(())
    }
}
