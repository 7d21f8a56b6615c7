use inkgate_core::{TokenPurpose, UserStore};
use secrecy::Secret;

use crate::use_cases::{AuthFlowError, redeem_token};

/// Verify email use case - consumes a verification token
pub struct VerifyEmailUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> VerifyEmailUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, token: Secret<String>) -> Result<(), AuthFlowError> {
        let (user, token) =
            redeem_token(&self.user_store, TokenPurpose::EmailVerification, token).await?;

        self.user_store
            .mark_verified(user.id(), &token.digest())
            .await?;

        tracing::info!(user_id = %user.id(), "Email verified");
        Ok(())
    }
}
