//! UseCase: パスワードリセット
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PasswordResetUseCase の request / reset
//!
//! ### どのような状況を想定しているか
//! - 正常系：トークン発行からパスワード再設定、新しいパスワードでのログイン
//! - 異常系：未登録のメールアドレス、不正なトークン、必須項目の欠落
//! - エッジケース：使用済みトークンの再利用、保存期限切れのトークン

use std::sync::Arc;

use yagura_shared::time::Clock;

use crate::domain::{
    Email, PASSWORD_RESET_TTL_MILLIS, Password, PasswordHasher, Timestamp, TokenError,
    TokenService, UserRepository,
};

use super::error::{AccountError, Violations};

const INVALID_OR_EXPIRED: &str = "Invalid or expired reset token";

pub struct PasswordResetUseCase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl PasswordResetUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }

    /// Issue a reset token for the account registered under `email`.
    ///
    /// The token is stored on the account with a one hour expiry, replacing
    /// any earlier one, and returned for delivery.
    pub async fn request(&self, email: Option<String>) -> Result<String, AccountError> {
        let mut violations = Violations::new();
        let Some(email) = violations.require("email", email) else {
            return Err(violations.into_error());
        };

        let email = Email::new(email).map_err(|_| AccountError::UserNotFound)?;
        let mut account = self
            .users
            .find_by_email(&email)
            .await
            .ok_or(AccountError::UserNotFound)?;

        let token = self.tokens.issue_reset(&account.id)?;
        let now = self.clock.now_millis();
        account.reset_token = Some(token.clone());
        account.reset_token_expiry = Some(Timestamp::new(now + PASSWORD_RESET_TTL_MILLIS));
        account.updated_at = Timestamp::new(now);
        let account = self.users.update(account).await?;

        tracing::info!("Issued password reset token for '{}'", account.id);
        Ok(token)
    }

    /// Set a new password using a token issued by [`Self::request`].
    ///
    /// A token is accepted once.
    pub async fn reset(
        &self,
        token: Option<String>,
        new_password: Option<String>,
    ) -> Result<(), AccountError> {
        let mut violations = Violations::new();
        let token = violations.require("token", token);
        let new_password = violations
            .require("newPassword", new_password)
            .and_then(|v| violations.check("newPassword", Password::new(v)));
        let (Some(token), Some(new_password)) = (token, new_password) else {
            return Err(violations.into_error());
        };

        let user_id = match self.tokens.verify_reset(&token) {
            Ok(user_id) => user_id,
            Err(TokenError::Expired) => {
                return Err(AccountError::InvalidResetToken(INVALID_OR_EXPIRED));
            }
            Err(e) => {
                tracing::debug!("Rejected reset token: {}", e);
                return Err(AccountError::InvalidResetToken("Invalid reset token"));
            }
        };

        let now = Timestamp::new(self.clock.now_millis());
        let mut account = self
            .users
            .find_by_id(&user_id)
            .await
            .filter(|account| account.accepts_reset_token(&token, now))
            .ok_or(AccountError::InvalidResetToken(INVALID_OR_EXPIRED))?;

        account.password_hash = self.hasher.hash(&new_password).await?;
        account.reset_token = None;
        account.reset_token_expiry = None;
        account.updated_at = now;
        let account = self.users.update(account).await?;

        tracing::info!("Reset password of '{}'", account.id);
        Ok(())
    }
}
