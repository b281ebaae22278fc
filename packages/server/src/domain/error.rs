//! Domain layer errors.

use thiserror::Error;

/// Errors raised when constructing a value object from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} is required")]
    Empty(&'static str),

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{0} is malformed")]
    Malformed(&'static str),
}

/// Errors raised by repositories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("user '{0}' not found")]
    UserNotFound(String),
}

/// Errors raised while pushing a message to connected clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode message: {0}")]
    EncodeFailed(String),
}

/// Errors raised by the token service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid,

    #[error("failed to issue token: {0}")]
    Issue(String),
}

/// Errors raised by the password hasher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(pub String);

/// Errors raised by the movie catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("movie catalog API key is not configured")]
    NotConfigured,

    #[error("movie catalog request failed: {0}")]
    Upstream(String),
}
