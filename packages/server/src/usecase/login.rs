//! UseCase: ログイン

use std::sync::Arc;

use crate::domain::{Email, Identity, PasswordHasher, TokenService, UserRepository};

use super::error::{AccountError, Violations};

pub struct LoginUseCase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl LoginUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Exchange credentials for an access token.
    ///
    /// An unknown e-mail and a wrong password are indistinguishable to the caller.
    pub async fn execute(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<String, AccountError> {
        let mut violations = Violations::new();
        let email = violations.require("email", email);
        let password = violations.require("password", password);
        let (Some(email), Some(password)) = (email, password) else {
            return Err(violations.into_error());
        };

        let email = Email::new(email).map_err(|_| AccountError::InvalidCredentials)?;
        let Some(account) = self.users.find_by_email(&email).await else {
            tracing::debug!("Login attempt for unknown e-mail");
            return Err(AccountError::InvalidCredentials);
        };
        if !self.hasher.verify(&password, &account.password_hash).await? {
            tracing::debug!("Login attempt with wrong password for '{}'", account.id);
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.tokens.issue(&Identity {
            user_id: account.id,
            username: account.username,
            email: account.email,
        })?;
        Ok(token)
    }
}
