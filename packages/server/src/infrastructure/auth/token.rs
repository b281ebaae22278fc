//! HS256 JWT token service.

use std::sync::Arc;

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use yagura_shared::time::{Clock, SystemClock};

use crate::domain::{
    Email, Identity, PASSWORD_RESET_TTL_MILLIS, TokenError, TokenService, UserId, Username,
};

const RESET_PURPOSE: &str = "password_reset";

/// Claims embedded in an access token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the user's id.
    sub: String,
    username: String,
    email: String,
    /// Issued-at (unix seconds).
    iat: i64,
    /// Expiration (unix seconds).
    exp: i64,
}

/// Claims embedded in a password reset token.
#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    sub: String,
    purpose: String,
    iat: i64,
    exp: i64,
}

fn map_decode_error(e: jsonwebtoken::errors::Error) -> TokenError {
    match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    }
}

pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(secret: &str, ttl_hours: u32) -> Self {
        Self::with_clock(secret, ttl_hours, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &str, ttl_hours: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: i64::from(ttl_hours) * 3600,
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let now = self.clock.now_millis() / 1000;
        let claims = Claims {
            sub: identity.user_id.to_string(),
            username: identity.username.to_string(),
            email: identity.email.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(map_decode_error)?;

        let claims = data.claims;
        Ok(Identity {
            user_id: UserId::parse(&claims.sub).map_err(|_| TokenError::Invalid)?,
            username: Username::new(claims.username).map_err(|_| TokenError::Invalid)?,
            email: Email::new(claims.email).map_err(|_| TokenError::Invalid)?,
        })
    }

    fn issue_reset(&self, user_id: &UserId) -> Result<String, TokenError> {
        let now = self.clock.now_millis() / 1000;
        let claims = ResetClaims {
            sub: user_id.to_string(),
            purpose: RESET_PURPOSE.to_string(),
            iat: now,
            exp: now + PASSWORD_RESET_TTL_MILLIS / 1000,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    fn verify_reset(&self, token: &str) -> Result<UserId, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let claims = decode::<ResetClaims>(token, &self.decoding_key, &validation)
            .map_err(map_decode_error)?
            .claims;
        if claims.purpose != RESET_PURPOSE {
            return Err(TokenError::Invalid);
        }
        UserId::parse(&claims.sub).map_err(|_| TokenError::Invalid)
    }
}
