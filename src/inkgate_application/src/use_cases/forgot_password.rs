use chrono::Utc;
use inkgate_core::{Email, EmailClient, IssuedToken, TokenPurpose, UserStore, UserStoreError};
use secrecy::ExposeSecret;

use crate::{
    notifications::{self, PasswordResetEmail},
    policy::AuthPolicy,
    use_cases::AuthFlowError,
};

/// Forgot password use case - issues a reset token if the account exists
///
/// The outcome is the same for known and unknown addresses.
pub struct ForgotPasswordUseCase<U, E>
where
    U: UserStore,
    E: EmailClient,
{
    user_store: U,
    email_client: E,
    policy: AuthPolicy,
}

impl<U, E> ForgotPasswordUseCase<U, E>
where
    U: UserStore,
    E: EmailClient,
{
    pub fn new(user_store: U, email_client: E, policy: AuthPolicy) -> Self {
        Self {
            user_store,
            email_client,
            policy,
        }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), AuthFlowError> {
        let user = match self.user_store.get_user(&email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                tracing::debug!("Password reset requested for unknown account");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let (token, issued) = IssuedToken::issue(self.policy.reset_ttl, Utc::now());
        self.user_store
            .store_token(user.id(), TokenPurpose::PasswordReset, issued)
            .await?;

        let link = self.policy.reset_link(token.as_ref().expose_secret());
        let template = PasswordResetEmail {
            link: &link,
            valid_minutes: self.policy.reset_ttl.num_minutes(),
        };
        notifications::deliver(&self.email_client, &email, template).await;

        Ok(())
    }
}
