use chrono::Utc;
use inkgate_core::{Email, EmailClient, IssuedToken, TokenPurpose, UserStore, UserStoreError};
use secrecy::ExposeSecret;

use crate::{
    notifications::{self, VerificationEmail},
    policy::AuthPolicy,
    use_cases::AuthFlowError,
};

/// Resend verification use case - reissues the verification token
///
/// Unknown and already verified accounts get the same outcome as a real resend.
pub struct ResendVerificationUseCase<U, E>
where
    U: UserStore,
    E: EmailClient,
{
    user_store: U,
    email_client: E,
    policy: AuthPolicy,
}

impl<U, E> ResendVerificationUseCase<U, E>
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

    #[tracing::instrument(name = "ResendVerificationUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), AuthFlowError> {
        let user = match self.user_store.get_user(&email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if user.is_verified() {
            tracing::debug!(user_id = %user.id(), "Account already verified");
            return Ok(());
        }

        let (token, issued) = IssuedToken::issue(self.policy.verification_ttl, Utc::now());
        self.user_store
            .store_token(user.id(), TokenPurpose::EmailVerification, issued)
            .await?;

        let link = self.policy.verification_link(token.as_ref().expose_secret());
        let template = VerificationEmail {
            link: &link,
            valid_hours: self.policy.verification_ttl.num_hours(),
        };
        notifications::deliver(&self.email_client, &email, template).await;

        Ok(())
    }
}
