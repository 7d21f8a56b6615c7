use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};
use inkgate_application::ResetPasswordUseCase;
use inkgate_core::{PasswordHasher, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use super::MessageResponse;
use crate::http::error::AuthApiError;

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<U, H>(
    State((user_store, password_hasher)): State<(U, H)>,
    Path(token): Path<String>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let Json(request) = payload?;

    ResetPasswordUseCase::new(user_store, password_hasher)
        .execute(Secret::new(token), request.password)
        .await?;

    Ok(Json(MessageResponse::new(
        "Your password has been reset. Sign in with your new password",
    )))
}
