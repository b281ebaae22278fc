//! UseCase layer errors.

use thiserror::Error;

use crate::domain::{PasswordError, RepositoryError, TokenError, ValueObjectError};

/// Precondition failures of relay events.
///
/// These never reach the originating connection; the WebSocket handler logs
/// and drops them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("connection '{0}' has not joined")]
    NotJoined(String),
}

/// A single invalid request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Errors of the account use cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The password supplied to confirm a sensitive operation is wrong
    #[error("{0}")]
    IncorrectPassword(&'static str),

    #[error("User not found")]
    UserNotFound,

    /// The password reset token is malformed, superseded, used or expired
    #[error("{0}")]
    InvalidResetToken(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AccountError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateUsername(_) | RepositoryError::DuplicateEmail(_) => {
                AccountError::Conflict("User with this email or username already exists".into())
            }
            RepositoryError::UserNotFound(_) => AccountError::UserNotFound,
        }
    }
}

impl From<PasswordError> for AccountError {
    fn from(err: PasswordError) -> Self {
        AccountError::Internal(err.to_string())
    }
}

impl From<TokenError> for AccountError {
    fn from(err: TokenError) -> Self {
        AccountError::Internal(err.to_string())
    }
}

/// Collects field-level validation failures across a request.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `field` as missing when `value` is `None` or blank.
    pub fn require(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        match value {
            Some(value) if !value.trim().is_empty() => Some(value),
            _ => {
                self.add(field, format!("{} is required", field));
                None
            }
        }
    }

    /// Keep the value of a successful check, record the failure otherwise.
    pub fn check<T>(
        &mut self,
        field: &'static str,
        result: Result<T, ValueObjectError>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.add(field, e.to_string());
                None
            }
        }
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_error(self) -> AccountError {
        AccountError::Validation(self.0)
    }
}
