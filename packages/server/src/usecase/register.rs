//! UseCase: アカウント登録

use std::sync::Arc;

use yagura_shared::time::Clock;

use crate::domain::{
    Email, Identity, Password, PasswordHasher, Timestamp, TokenService, UserAccount, UserId,
    UserRepository, Username,
};

use super::error::{AccountError, Violations};

/// Raw registration fields, validated by the use case.
#[derive(Debug, Default, Clone)]
pub struct RegisterInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct RegisterUseCase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl RegisterUseCase {
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

    /// Create an account and return an access token for it.
    pub async fn execute(&self, input: RegisterInput) -> Result<String, AccountError> {
        let mut violations = Violations::new();
        let username = violations
            .require("username", input.username)
            .and_then(|v| violations.check("username", Username::new(v)));
        let email = violations
            .require("email", input.email)
            .and_then(|v| violations.check("email", Email::new(v)));
        let password = violations
            .require("password", input.password)
            .and_then(|v| violations.check("password", Password::new(v)));

        let (Some(username), Some(email), Some(password)) = (username, email, password) else {
            return Err(violations.into_error());
        };

        let now = Timestamp::new(self.clock.now_millis());
        let account = UserAccount {
            id: UserId::generate(),
            username,
            email,
            password_hash: self.hasher.hash(&password).await?,
            reset_token: None,
            reset_token_expiry: None,
            created_at: now,
            updated_at: now,
        };
        let account = self.users.create(account).await?;
        tracing::info!("Registered user '{}' ({})", account.username, account.id);

        let token = self.tokens.issue(&Identity {
            user_id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
        })?;
        Ok(token)
    }
}
