pub mod forgot_password;
pub mod login;
pub mod resend_verification;
pub mod reset_password;
pub mod signup;
pub mod verify_email;

use chrono::Utc;
use inkgate_core::{
    OneTimeToken, OneTimeTokenError, PasswordHasherError, SessionTokenError, TokenPurpose, User,
    UserError, UserStore, UserStoreError,
};
use secrecy::Secret;
use thiserror::Error;

/// Failures of the auth flow use cases.
#[derive(Debug, Error)]
pub enum AuthFlowError {
    #[error(transparent)]
    Validation(#[from] UserError),
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Email address has not been verified")]
    EmailNotVerified,
    #[error("An account with this email already exists")]
    AccountExists,
    #[error(transparent)]
    InvalidToken(#[from] OneTimeTokenError),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<PasswordHasherError> for AuthFlowError {
    fn from(e: PasswordHasherError) -> Self {
        Self::Unexpected(e.to_string())
    }
}

impl From<SessionTokenError> for AuthFlowError {
    fn from(e: SessionTokenError) -> Self {
        Self::Unexpected(e.to_string())
    }
}

impl From<UserStoreError> for AuthFlowError {
    fn from(e: UserStoreError) -> Self {
        match e {
            UserStoreError::UserAlreadyExists => Self::AccountExists,
            UserStoreError::TokenNotFound => Self::InvalidToken(OneTimeTokenError::Unknown),
            UserStoreError::UserNotFound | UserStoreError::UnexpectedError(_) => {
                Self::Unexpected(e.to_string())
            }
        }
    }
}

/// Resolve a presented one-time token to the user holding it.
///
/// Expired tokens are cleared from the store before being rejected.
pub(crate) async fn redeem_token<U: UserStore>(
    user_store: &U,
    purpose: TokenPurpose,
    raw: Secret<String>,
) -> Result<(User, OneTimeToken), AuthFlowError> {
    let token = OneTimeToken::parse(raw)?;
    let digest = token.digest();

    let user = match user_store.get_user_by_token(purpose, &digest).await {
        Ok(user) => user,
        Err(UserStoreError::TokenNotFound | UserStoreError::UserNotFound) => {
            return Err(OneTimeTokenError::Unknown.into());
        }
        Err(e) => return Err(e.into()),
    };

    let expired = user
        .token(purpose)
        .is_none_or(|issued| issued.is_expired_at(Utc::now()));
    if expired {
        if let Err(e) = user_store.clear_token(user.id(), purpose, &digest).await {
            tracing::warn!(error = %e, purpose = purpose.as_str(), "Failed to clear expired token");
        }
        return Err(OneTimeTokenError::Expired.into());
    }

    Ok((user, token))
}
