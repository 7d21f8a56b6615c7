use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use inkgate_core::{
    Email, HashedPassword, IssuedToken, TokenDigest, TokenPurpose, User, UserId, UserStore,
    UserStoreError,
};

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Email, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn find_by_id<'a>(users: &'a mut HashMap<Email, User>, id: &UserId) -> Option<&'a mut User> {
    users.values_mut().find(|user| user.id() == id)
}

fn holds_token(user: &User, purpose: TokenPurpose, digest: &TokenDigest) -> bool {
    user.token(purpose)
        .is_some_and(|token| token.digest() == digest)
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.email().clone(), user);
        Ok(())
    }

    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .get(email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|user| user.id() == id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_token(
        &self,
        purpose: TokenPurpose,
        digest: &TokenDigest,
    ) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|user| holds_token(user, purpose, digest))
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
        let user = find_by_id(&mut users, id).ok_or(UserStoreError::UserNotFound)?;
        user.set_token(purpose, token);
        Ok(())
    }

    async fn mark_verified(
        &self,
        id: &UserId,
        expected: &TokenDigest,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = find_by_id(&mut users, id).ok_or(UserStoreError::UserNotFound)?;
        if !holds_token(user, TokenPurpose::EmailVerification, expected) {
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
        let user = find_by_id(&mut users, id).ok_or(UserStoreError::UserNotFound)?;
        if !holds_token(user, TokenPurpose::PasswordReset, expected) {
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
        let user = find_by_id(&mut users, id).ok_or(UserStoreError::UserNotFound)?;
        if holds_token(user, purpose, expected) {
            user.clear_token(purpose);
        }
        Ok(())
    }
}
