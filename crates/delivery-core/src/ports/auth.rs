//! Authentication ports.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Decoded view of a bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub subject: Uuid,
    pub issuer: String,
    pub audience: String,
    pub not_before: i64,
    pub expires_at: i64,
}

/// Token issuer for signed, time-bounded bearer tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token for `subject` valid from `now` for the configured lifetime.
    fn issue_token_at(&self, subject: Uuid, now: DateTime<Utc>) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Token lifetime in seconds.
    fn lifetime_seconds(&self) -> i64;

    /// Issue a token for `subject` starting at the current UTC time.
    fn issue_token(&self, subject: Uuid) -> Result<String, AuthError> {
        self.issue_token_at(subject, Utc::now())
    }
}

/// Turns a raw password into the stored credential and checks it back.
pub trait PasswordService: Send + Sync {
    /// Produce the value persisted on the user record.
    fn store(&self, password: &str) -> Result<String, AuthError>;

    /// Check a supplied password against the stored value.
    fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
