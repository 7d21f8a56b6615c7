use inkgate_core::{Password, PasswordHasher, TokenPurpose, UserStore};
use secrecy::Secret;

use crate::use_cases::{AuthFlowError, redeem_token};

/// Reset password use case - consumes a reset token and replaces the password
///
/// Bumping the session version on success revokes every session token that
/// was issued with the old password.
pub struct ResetPasswordUseCase<U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: U,
    password_hasher: H,
}

impl<U, H> ResetPasswordUseCase<U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: U, password_hasher: H) -> Self {
        Self {
            user_store,
            password_hasher,
        }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: Secret<String>,
        new_password: Secret<String>,
    ) -> Result<(), AuthFlowError> {
        let (user, token) = redeem_token(&self.user_store, TokenPurpose::PasswordReset, token).await?;

        let new_password = Password::try_from(new_password)?;
        let new_hash = self.password_hasher.hash(new_password).await?;

        self.user_store
            .reset_password(user.id(), &token.digest(), new_hash)
            .await?;

        tracing::info!(user_id = %user.id(), "Password reset");
        Ok(())
    }
}
