use axum::{Json, extract::State, extract::rejection::JsonRejection, response::IntoResponse};
use inkgate_application::{AuthPolicy, LoginUseCase};
use inkgate_core::{Email, Identity, PasswordHasher, SessionTokenService, UserStore};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::http::error::AuthApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Serialize)]
pub struct LoginResponseBody {
    pub token: String,
    pub user: Identity,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, H, T>(
    State((user_store, password_hasher, session_tokens, policy)): State<(U, H, T, AuthPolicy)>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: SessionTokenService + Clone + 'static,
{
    let Json(request) = payload?;

    let email = Email::try_from(request.email)?;

    let use_case = LoginUseCase::new(user_store, password_hasher, session_tokens, policy);
    let response = use_case.execute(email, request.password).await?;

    Ok(Json(LoginResponseBody {
        token: response.token.as_ref().expose_secret().clone(),
        user: response.user,
    }))
}
