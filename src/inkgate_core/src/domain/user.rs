use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{
    email::Email,
    one_time_token::{IssuedToken, TokenPurpose},
    password::HashedPassword,
    user_id::UserId,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be between 8 and 128 characters")]
    PasswordLength,
    #[error("Password must contain at least one letter and one digit")]
    PasswordTooWeak,
}

/// A reader account.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    password_hash: HashedPassword,
    is_verified: bool,
    verification_token: Option<IssuedToken>,
    reset_token: Option<IssuedToken>,
    session_version: i32,
    created_at: DateTime<Utc>,
}

/// Every persisted field of a [`User`], used by stores to rebuild records.
#[derive(Debug, Clone)]
pub struct UserParts {
    pub id: UserId,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub is_verified: bool,
    pub verification_token: Option<IssuedToken>,
    pub reset_token: Option<IssuedToken>,
    pub session_version: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A freshly signed-up account: unverified and holding its first verification token.
    pub fn new(
        email: Email,
        password_hash: HashedPassword,
        verification_token: IssuedToken,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            email,
            password_hash,
            is_verified: false,
            verification_token: Some(verification_token),
            reset_token: None,
            session_version: 0,
            created_at,
        }
    }

    pub fn from_parts(parts: UserParts) -> Self {
        Self {
            id: parts.id,
            email: parts.email,
            password_hash: parts.password_hash,
            is_verified: parts.is_verified,
            verification_token: parts.verification_token,
            reset_token: parts.reset_token,
            session_version: parts.session_version,
            created_at: parts.created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn session_version(&self) -> i32 {
        self.session_version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn token(&self, purpose: TokenPurpose) -> Option<&IssuedToken> {
        match purpose {
            TokenPurpose::EmailVerification => self.verification_token.as_ref(),
            TokenPurpose::PasswordReset => self.reset_token.as_ref(),
        }
    }

    /// Overwrites any previous token of the same purpose.
    pub fn set_token(&mut self, purpose: TokenPurpose, token: IssuedToken) {
        match purpose {
            TokenPurpose::EmailVerification => self.verification_token = Some(token),
            TokenPurpose::PasswordReset => self.reset_token = Some(token),
        }
    }

    pub fn clear_token(&mut self, purpose: TokenPurpose) {
        match purpose {
            TokenPurpose::EmailVerification => self.verification_token = None,
            TokenPurpose::PasswordReset => self.reset_token = None,
        }
    }

    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.verification_token = None;
    }

    /// Replaces the password hash, consumes the reset token and revokes
    /// every session token issued so far.
    pub fn replace_password(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
        self.reset_token = None;
        self.session_version += 1;
    }
}
