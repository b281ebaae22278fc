//! Authentication collaborators: password hashing and token issuance.

use async_trait::async_trait;

use super::{
    error::{PasswordError, TokenError},
    value_object::{Email, Password, UserId, Username},
};

/// Identity carried inside an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub username: Username,
    pub email: Email,
}

/// Hashing is CPU bound; implementations keep it off the async workers.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<String, PasswordError>;

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

pub trait TokenService: Send + Sync {
    fn issue(&self, identity: &Identity) -> Result<String, TokenError>;

    fn verify(&self, token: &str) -> Result<Identity, TokenError>;

    /// Issue a password reset token for `user_id`. Reset tokens are not
    /// accepted as access tokens and vice versa.
    fn issue_reset(&self, user_id: &UserId) -> Result<String, TokenError>;

    fn verify_reset(&self, token: &str) -> Result<UserId, TokenError>;
}
