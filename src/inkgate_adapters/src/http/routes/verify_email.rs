use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use inkgate_application::VerifyEmailUseCase;
use inkgate_core::UserStore;
use secrecy::Secret;

use super::MessageResponse;
use crate::http::error::AuthApiError;

#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email<U>(
    State(user_store): State<U>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
{
    VerifyEmailUseCase::new(user_store)
        .execute(Secret::new(token))
        .await?;

    Ok(Json(MessageResponse::new("Your email address has been verified")))
}
