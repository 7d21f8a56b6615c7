use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use inkgate_core::{
    Email, EmailClient, EmailMessage, HashedPassword, IssuedToken, OneTimeToken, Password, PasswordHasher,
    PasswordHasherError, SessionClaims, SessionToken, SessionTokenError, SessionTokenService,
    TokenDigest, TokenPurpose, User, UserId, UserStore, UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

// Mock user store for testing
#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MockUserStore {
    pub async fn snapshot(&self, email: &str) -> User {
        let email = Email::parse(email).unwrap();
        self.get_user(&email).await.unwrap()
    }

    /// Store a token directly, bypassing the use cases.
    pub async fn force_token(&self, email: &str, purpose: TokenPurpose, token: IssuedToken) {
        let user = self.snapshot(email).await;
        self.store_token(user.id(), purpose, token).await.unwrap();
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email() == user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(*user.id(), user);
        Ok(())
    }

    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email() == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users.get(id).cloned().ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_token(
        &self,
        purpose: TokenPurpose,
        digest: &TokenDigest,
    ) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.token(purpose).is_some_and(|t| t.digest() == digest))
            .cloned()
            .ok_or(UserStoreError::TokenNotFound)
    }

    async fn store_token(
        &self,
        id: &UserId,
        purpose: TokenPurpose,
        token: IssuedToken,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        user.set_token(purpose, token);
        Ok(())
    }

    async fn mark_verified(
        &self,
        id: &UserId,
        expected: &TokenDigest,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        if !holds(user, TokenPurpose::EmailVerification, expected) {
            return Err(UserStoreError::TokenNotFound);
        }
        user.mark_verified();
        Ok(())
    }

    async fn reset_password(
        &self,
        id: &UserId,
        expected: &TokenDigest,
        new_hash: HashedPassword,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        if !holds(user, TokenPurpose::PasswordReset, expected) {
            return Err(UserStoreError::TokenNotFound);
        }
        user.replace_password(new_hash);
        Ok(())
    }

    async fn clear_token(
        &self,
        id: &UserId,
        purpose: TokenPurpose,
        expected: &TokenDigest,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;
        if holds(user, purpose, expected) {
            user.clear_token(purpose);
        }
        Ok(())
    }
}

fn holds(user: &User, purpose: TokenPurpose, expected: &TokenDigest) -> bool {
    user.token(purpose).is_some_and(|t| t.digest() == expected)
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

/// Email client that keeps every message; optionally fails every send.
#[derive(Clone, Default)]
pub struct RecordingEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    fail: bool,
}

impl RecordingEmailClient {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }

    /// The token carried by the last link sent to `recipient`.
    pub async fn last_token_for(&self, recipient: &str) -> Secret<String> {
        let sent = self.sent.read().await;
        let email = sent
            .iter()
            .rev()
            .find(|e| e.recipient == recipient)
            .expect("no email sent to recipient");
        let token = email
            .content
            .split(|c: char| c.is_whitespace() || c == '/')
            .find(|word| word.len() == 64 && word.chars().all(|c| c.is_ascii_hexdigit()))
            .expect("email carries no token");
        Secret::new(token.to_string())
    }
}

#[async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String> {
        if self.fail {
            return Err("mail server unavailable".to_string());
        }
        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            subject: message.subject.clone(),
            content: message.text_body.clone(),
        });
        Ok(())
    }
}

/// Reversible stand-in for a real hasher.
#[derive(Clone, Default)]
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: Password) -> Result<HashedPassword, PasswordHasherError> {
        Ok(HashedPassword::new(Secret::new(format!(
            "plain:{}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(
        &self,
        candidate: Secret<String>,
        expected: HashedPassword,
    ) -> Result<bool, PasswordHasherError> {
        Ok(expected.as_ref().expose_secret() == &format!("plain:{}", candidate.expose_secret()))
    }
}

/// Hasher that records every hash it is asked to verify against.
#[derive(Clone, Default)]
pub struct CountingHasher {
    verified: Arc<RwLock<Vec<String>>>,
}

impl CountingHasher {
    pub async fn verified(&self) -> Vec<String> {
        self.verified.read().await.clone()
    }
}

#[async_trait]
impl PasswordHasher for CountingHasher {
    async fn hash(&self, password: Password) -> Result<HashedPassword, PasswordHasherError> {
        PlainHasher.hash(password).await
    }

    async fn verify(
        &self,
        candidate: Secret<String>,
        expected: HashedPassword,
    ) -> Result<bool, PasswordHasherError> {
        self.verified
            .write()
            .await
            .push(expected.as_ref().expose_secret().clone());
        PlainHasher.verify(candidate, expected).await
    }
}

/// Session tokens of the form `<user id>:<version>`.
#[derive(Clone, Default)]
pub struct StubSessionTokens;

impl SessionTokenService for StubSessionTokens {
    fn issue(&self, user: &User) -> Result<SessionToken, SessionTokenError> {
        let value = format!("{}:{}", user.id(), user.session_version());
        Ok(SessionToken::new(
            Secret::new(value),
            Utc::now() + Duration::hours(1),
        ))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError> {
        let (id, version) = token.split_once(':').ok_or(SessionTokenError::Malformed)?;
        let now = Utc::now();
        Ok(SessionClaims {
            user_id: UserId::parse(id).map_err(|_| SessionTokenError::Malformed)?,
            session_version: version.parse().map_err(|_| SessionTokenError::Malformed)?,
            issued_at: now,
            expires_at: now + Duration::hours(1),
        })
    }
}

pub fn email(raw: &str) -> Email {
    Email::parse(raw).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::new(raw.to_string())).unwrap()
}

pub fn secret(raw: &str) -> Secret<String> {
    Secret::new(raw.to_string())
}

/// An issued token that expired a minute ago.
pub fn expired_token() -> (OneTimeToken, IssuedToken) {
    IssuedToken::issue(Duration::hours(1), Utc::now() - Duration::minutes(61))
}
