use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use inkgate_application::{AuthPolicy, ResendVerificationUseCase};
use inkgate_core::{Email, EmailClient, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use super::MessageResponse;
use crate::http::error::AuthApiError;

pub const RESEND_VERIFICATION_MESSAGE: &str =
    "If this email belongs to an unverified account, a new verification link has been sent";

#[derive(Deserialize)]
pub struct ResendVerificationRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Resend verification", skip_all)]
pub async fn resend_verification<U, E>(
    State((user_store, email_client, policy)): State<(U, E, AuthPolicy)>,
    payload: Result<Json<ResendVerificationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let Json(request) = payload?;

    let email = Email::try_from(request.email)?;

    ResendVerificationUseCase::new(user_store, email_client, policy)
        .execute(email)
        .await?;

    Ok(Json(MessageResponse::new(RESEND_VERIFICATION_MESSAGE)))
}
