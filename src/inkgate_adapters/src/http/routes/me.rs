use axum::{Extension, Json, response::IntoResponse};
use inkgate_core::Identity;

/// The authenticated caller, as resolved by the session gate.
#[tracing::instrument(name = "Current user", skip_all)]
pub async fn me(Extension(identity): Extension<Identity>) -> impl IntoResponse {
    Json(identity)
}
