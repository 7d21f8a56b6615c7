use std::time::Duration;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use inkgate_application::AuthFlowError;
use inkgate_core::{OneTimeTokenError, SessionTokenError, UserError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth_validation::SessionAuthError;

const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong, please try again later";

/// Category of a failed request, serialized as the `kind` of every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    ValidationError,
    AuthenticationError,
    TokenError,
    RateLimitError,
    ConflictError,
    InternalError,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Authentication(String),

    /// Email verification or password reset token.
    #[error("{0}")]
    OneTimeToken(String),

    #[error("{0}")]
    SessionToken(String),

    #[error("Too many requests, please try again later")]
    RateLimited { retry_after: Duration },

    #[error("{0}")]
    Conflict(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl AuthApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthApiError::Validation(_) => ErrorKind::ValidationError,
            AuthApiError::Authentication(_) => ErrorKind::AuthenticationError,
            AuthApiError::OneTimeToken(_) | AuthApiError::SessionToken(_) => ErrorKind::TokenError,
            AuthApiError::RateLimited { .. } => ErrorKind::RateLimitError,
            AuthApiError::Conflict(_) => ErrorKind::ConflictError,
            AuthApiError::UnexpectedError(_) => ErrorKind::InternalError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthApiError::Validation(_) | AuthApiError::OneTimeToken(_) => StatusCode::BAD_REQUEST,
            AuthApiError::Authentication(_) | AuthApiError::SessionToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AuthApiError::Conflict(_) => StatusCode::CONFLICT,
            AuthApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let message = match &self {
            AuthApiError::UnexpectedError(detail) => {
                tracing::error!(error = %detail, "Request failed unexpectedly");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            kind: self.kind(),
            message,
        });

        let mut response = (status_code, body).into_response();
        if let AuthApiError::RateLimited { retry_after } = self {
            let seconds = retry_after.as_secs().max(1);
            if let Ok(value) = HeaderValue::from_str(&seconds.to_string()) {
                response.headers_mut().insert(RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<UserError> for AuthApiError {
    fn from(error: UserError) -> Self {
        AuthApiError::Validation(error.to_string())
    }
}

impl From<JsonRejection> for AuthApiError {
    fn from(rejection: JsonRejection) -> Self {
        AuthApiError::Validation(rejection.body_text())
    }
}

impl From<OneTimeTokenError> for AuthApiError {
    fn from(error: OneTimeTokenError) -> Self {
        AuthApiError::OneTimeToken(error.to_string())
    }
}

impl From<AuthFlowError> for AuthApiError {
    fn from(error: AuthFlowError) -> Self {
        match error {
            AuthFlowError::Validation(e) => e.into(),
            AuthFlowError::InvalidCredentials | AuthFlowError::EmailNotVerified => {
                AuthApiError::Authentication(error.to_string())
            }
            AuthFlowError::AccountExists => AuthApiError::Conflict(error.to_string()),
            AuthFlowError::InvalidToken(e) => e.into(),
            AuthFlowError::Unexpected(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<SessionAuthError> for AuthApiError {
    fn from(error: SessionAuthError) -> Self {
        match error {
            SessionAuthError::InvalidToken(SessionTokenError::UnexpectedError(e))
            | SessionAuthError::UnexpectedError(e) => AuthApiError::UnexpectedError(e),
            SessionAuthError::MissingToken
            | SessionAuthError::InvalidToken(_)
            | SessionAuthError::Revoked => AuthApiError::SessionToken(error.to_string()),
        }
    }
}
