use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};
use thiserror::Error;

const TOKEN_BYTES: usize = 32;

/// What a one-time token proves possession of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenPurpose {
    EmailVerification,
    PasswordReset,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::EmailVerification => "email_verification",
            TokenPurpose::PasswordReset => "password_reset",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OneTimeTokenError {
    #[error("Token is missing")]
    Missing,
    #[error("Token is malformed")]
    Malformed,
    #[error("Token has expired")]
    Expired,
    #[error("Token is invalid")]
    Unknown,
}

/// The raw token value delivered to the user by email.
///
/// 256 bits from the thread-local CSPRNG, hex encoded. The raw value is never
/// persisted; stores only see its [`TokenDigest`].
#[derive(Debug, Clone)]
pub struct OneTimeToken(Secret<String>);

impl OneTimeToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(Secret::new(hex::encode(bytes)))
    }

    pub fn parse(raw: Secret<String>) -> Result<Self, OneTimeTokenError> {
        let value = raw.expose_secret().trim();
        if value.is_empty() {
            return Err(OneTimeTokenError::Missing);
        }
        if value.len() != TOKEN_BYTES * 2 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(OneTimeTokenError::Malformed);
        }
        Ok(Self(Secret::new(value.to_ascii_lowercase())))
    }

    pub fn digest(&self) -> TokenDigest {
        let mut hasher = Sha256::new();
        hasher.update(self.0.expose_secret().as_bytes());
        TokenDigest(hex::encode(hasher.finalize()))
    }
}

impl AsRef<Secret<String>> for OneTimeToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// SHA-256 digest of a one-time token, the only form that is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    pub fn from_stored(hex_digest: String) -> Self {
        Self(hex_digest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored token digest together with its expiry instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    digest: TokenDigest,
    expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Generate a fresh token valid for `ttl` from `now`.
    ///
    /// Returns the raw token for delivery and the record to persist.
    pub fn issue(ttl: Duration, now: DateTime<Utc>) -> (OneTimeToken, IssuedToken) {
        let token = OneTimeToken::generate();
        let issued = IssuedToken {
            digest: token.digest(),
            expires_at: now + ttl,
        };
        (token, issued)
    }

    pub fn from_stored(digest: TokenDigest, expires_at: DateTime<Utc>) -> Self {
        Self { digest, expires_at }
    }

    pub fn digest(&self) -> &TokenDigest {
        &self.digest
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// A token is still valid at its exact expiry instant and expired strictly after it.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
