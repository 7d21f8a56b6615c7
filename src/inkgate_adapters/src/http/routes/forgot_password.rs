use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use inkgate_application::{AuthPolicy, ForgotPasswordUseCase};
use inkgate_core::{Email, EmailClient, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use super::MessageResponse;
use crate::http::error::AuthApiError;

/// Same answer whether or not the address belongs to an account.
pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account exists for this email, a password reset link has been sent";

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<U, E>(
    State((user_store, email_client, policy)): State<(U, E, AuthPolicy)>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let Json(request) = payload?;

    let email = Email::try_from(request.email)?;

    ForgotPasswordUseCase::new(user_store, email_client, policy)
        .execute(email)
        .await?;

    Ok(Json(MessageResponse::new(FORGOT_PASSWORD_MESSAGE)))
}
