use inkgate_core::{
    Email, HashedPassword, Identity, PasswordHasher, SessionToken, SessionTokenService, UserStore,
    UserStoreError,
};
use secrecy::Secret;

use crate::{policy::AuthPolicy, use_cases::AuthFlowError};

/// Argon2id hash with the default hasher cost. Unknown emails are verified
/// against it so they take as long as a wrong password.
pub const UNKNOWN_ACCOUNT_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$aW5rZ2F0ZS1sb2dpbi10aW1pbmctZXF1YWxpemVyISE";

/// Response from login use case
#[derive(Debug)]
pub struct LoginResponse {
    pub token: SessionToken,
    pub user: Identity,
}

/// Login use case - checks credentials and issues a session token
///
/// Attempts are not counted here; the login rate limit sits in front.
pub struct LoginUseCase<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: SessionTokenService,
{
    user_store: U,
    password_hasher: H,
    session_tokens: T,
    policy: AuthPolicy,
}

impl<U, H, T> LoginUseCase<U, H, T>
where
    U: UserStore,
    H: PasswordHasher,
    T: SessionTokenService,
{
    pub fn new(user_store: U, password_hasher: H, session_tokens: T, policy: AuthPolicy) -> Self {
        Self {
            user_store,
            password_hasher,
            session_tokens,
            policy,
        }
    }

    /// Execute the login use case
    ///
    /// Unknown email and wrong password fail with the same error.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Secret<String>,
    ) -> Result<LoginResponse, AuthFlowError> {
        let user = match self.user_store.get_user(&email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                let unknown = HashedPassword::new(Secret::new(UNKNOWN_ACCOUNT_HASH.to_string()));
                let _ = self.password_hasher.verify(password, unknown).await;
                return Err(AuthFlowError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        let matches = self
            .password_hasher
            .verify(password, user.password_hash().clone())
            .await?;
        if !matches {
            return Err(AuthFlowError::InvalidCredentials);
        }

        if self.policy.require_verified_email && !user.is_verified() {
            return Err(AuthFlowError::EmailNotVerified);
        }

        let token = self.session_tokens.issue(&user)?;
        tracing::info!(user_id = %user.id(), "Login succeeded");

        Ok(LoginResponse {
            token,
            user: Identity {
                id: *user.id(),
                email: user.email().clone(),
                is_verified: user.is_verified(),
            },
        })
    }
}
