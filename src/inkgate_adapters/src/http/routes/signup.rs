use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use inkgate_application::{AuthFlowError, AuthPolicy, SignupUseCase};
use inkgate_core::{Email, EmailClient, Password, PasswordHasher, UserStore};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::http::error::AuthApiError;

const SIGNUP_REJECTED: &str = "Unable to create an account with the provided details";

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupResponse {
    pub status: String,
    pub message: String,
}

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<U, H, E>(
    State((user_store, password_hasher, email_client, policy)): State<(U, H, E, AuthPolicy)>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let Json(request) = payload?;

    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let conceal = policy.conceal_account_existence;
    let use_case = SignupUseCase::new(user_store, password_hasher, email_client, policy);

    match use_case.execute(email, password).await {
        Ok(_) => Ok(Json(SignupResponse {
            status: "pending_verification".to_string(),
            message: "Account created. Check your inbox to verify your email address".to_string(),
        })),
        Err(AuthFlowError::AccountExists) if conceal => {
            Err(AuthApiError::Validation(SIGNUP_REJECTED.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
