use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    one_time_token::{IssuedToken, TokenDigest, TokenPurpose},
    password::HashedPassword,
    user::User,
    user_id::UserId,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Token not found")]
    TokenNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::TokenNotFound, Self::TokenNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence of user records and their one-time token digests.
///
/// Token consuming operations are compare-and-clear: they succeed only while
/// the stored digest still equals `expected`, so a token can be used once.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError>;
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError>;
    async fn get_user_by_token(
        &self,
        purpose: TokenPurpose,
        digest: &TokenDigest,
    ) -> Result<User, UserStoreError>;
    /// Overwrites any previous token of the same purpose.
    async fn store_token(
        &self,
        id: &UserId,
        purpose: TokenPurpose,
        token: IssuedToken,
    ) -> Result<(), UserStoreError>;
    async fn mark_verified(&self, id: &UserId, expected: &TokenDigest)
    -> Result<(), UserStoreError>;
    /// Replaces the hash, clears the reset token and bumps the session version.
    async fn reset_password(
        &self,
        id: &UserId,
        expected: &TokenDigest,
        new_hash: HashedPassword,
    ) -> Result<(), UserStoreError>;
    async fn clear_token(
        &self,
        id: &UserId,
        purpose: TokenPurpose,
        expected: &TokenDigest,
    ) -> Result<(), UserStoreError>;
}
