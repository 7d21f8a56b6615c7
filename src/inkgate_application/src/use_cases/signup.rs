use chrono::Utc;
use inkgate_core::{Email, EmailClient, IssuedToken, Password, PasswordHasher, User, UserId, UserStore};
use secrecy::ExposeSecret;

use crate::{
    notifications::{self, VerificationEmail},
    policy::AuthPolicy,
    use_cases::AuthFlowError,
};

/// Signup use case - registers an unverified account and sends the
/// verification link
pub struct SignupUseCase<U, H, E>
where
    U: UserStore,
    H: PasswordHasher,
    E: EmailClient,
{
    user_store: U,
    password_hasher: H,
    email_client: E,
    policy: AuthPolicy,
}

impl<U, H, E> SignupUseCase<U, H, E>
where
    U: UserStore,
    H: PasswordHasher,
    E: EmailClient,
{
    pub fn new(user_store: U, password_hasher: H, email_client: E, policy: AuthPolicy) -> Self {
        Self {
            user_store,
            password_hasher,
            email_client,
            policy,
        }
    }

    /// Execute the signup use case
    ///
    /// # Returns
    /// The id of the new account, or `AccountExists` if the email is taken
    #[tracing::instrument(name = "SignupUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<UserId, AuthFlowError> {
        let password_hash = self.password_hasher.hash(password).await?;
        let (token, issued) = IssuedToken::issue(self.policy.verification_ttl, Utc::now());

        let user = User::new(email.clone(), password_hash, issued, Utc::now());
        let user_id = *user.id();
        self.user_store.add_user(user).await?;

        tracing::info!(%user_id, "Account created");

        let link = self.policy.verification_link(token.as_ref().expose_secret());
        let template = VerificationEmail {
            link: &link,
            valid_hours: self.policy.verification_ttl.num_hours(),
        };
        notifications::deliver(&self.email_client, &email, template).await;

        Ok(user_id)
    }
}
