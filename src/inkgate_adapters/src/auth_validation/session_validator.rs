use async_trait::async_trait;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use inkgate_core::{
    AuthValidator, Identity, SessionTokenError, SessionTokenService, UserStore, UserStoreError,
};
use thiserror::Error;

/// Resolves `Authorization: Bearer` session tokens to the calling user.
///
/// Besides the signature and expiry, the token's session version must match
/// the stored one, so a password reset revokes every earlier token.
#[derive(Clone)]
pub struct SessionValidator<U, T> {
    user_store: U,
    session_tokens: T,
}

impl<U, T> SessionValidator<U, T> {
    pub fn new(user_store: U, session_tokens: T) -> Self {
        Self {
            user_store,
            session_tokens,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionAuthError {
    #[error("Missing session token")]
    MissingToken,
    #[error(transparent)]
    InvalidToken(#[from] SessionTokenError),
    #[error("Session has been revoked")]
    Revoked,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

#[async_trait]
impl<U, T> AuthValidator for SessionValidator<U, T>
where
    U: UserStore + Clone + 'static,
    T: SessionTokenService + Clone + 'static,
{
    type Claims = Identity;
    type RequestParts = http::request::Parts;
    type Error = SessionAuthError;

    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let bearer = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or(SessionAuthError::MissingToken)?;

        let claims = self.session_tokens.verify(bearer.token())?;

        let user = match self.user_store.get_user_by_id(&claims.user_id).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => return Err(SessionAuthError::Revoked),
            Err(e) => return Err(SessionAuthError::UnexpectedError(e.to_string())),
        };

        if user.session_version() != claims.session_version {
            tracing::debug!(user_id = %user.id(), "Session token predates a password reset");
            return Err(SessionAuthError::Revoked);
        }

        Ok(Identity {
            id: *user.id(),
            email: user.email().clone(),
            is_verified: user.is_verified(),
        })
    }
}
