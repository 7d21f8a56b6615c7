use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::{HashedPassword, Password},
    rate_limit::{ClientKey, EndpointClass, RateLimitDecision},
    session::{SessionClaims, SessionToken},
    user::User,
};

/// A rendered email. The HTML body is sent as an alternative to the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub text_body: String,
    pub html_body: Option<String>,
}

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
    #[error("Stored password hash is invalid: {0}")]
    InvalidHash(String),
}

/// One-way password hashing. Implementations must keep CPU-heavy work off
/// the async executor.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<HashedPassword, PasswordHasherError>;
    /// `Ok(false)` on mismatch; `Err` only when the stored hash cannot be parsed.
    async fn verify(
        &self,
        candidate: Secret<String>,
        expected: HashedPassword,
    ) -> Result<bool, PasswordHasherError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionTokenError {
    #[error("Session token is malformed")]
    Malformed,
    #[error("Session token has expired")]
    Expired,
    #[error("Session token signature is invalid")]
    SignatureInvalid,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Issues and verifies stateless session tokens.
pub trait SessionTokenService: Send + Sync {
    fn issue(&self, user: &User) -> Result<SessionToken, SessionTokenError>;
    fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError>;
}

#[derive(Debug, Error)]
pub enum RateLimiterError {
    #[error("Rate limiter backend error: {0}")]
    Backend(String),
}

/// Counts requests per `(endpoint class, client)` and decides whether the
/// current one is admitted. Every call counts as one request.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn check(
        &self,
        class: EndpointClass,
        client: &ClientKey,
    ) -> Result<RateLimitDecision, RateLimiterError>;
}
