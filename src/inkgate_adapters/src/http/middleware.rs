use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use inkgate_core::{AuthValidator, EndpointClass, RateLimitDecision, RateLimiter};

use super::{
    client_key::{client_key, peer_address},
    error::AuthApiError,
};

/// Shared state of the rate limiting middleware.
#[derive(Clone)]
pub struct RateLimitState {
    limiter: Arc<dyn RateLimiter>,
    trust_proxy_headers: bool,
}

impl RateLimitState {
    pub fn new(limiter: Arc<dyn RateLimiter>, trust_proxy_headers: bool) -> Self {
        Self {
            limiter,
            trust_proxy_headers,
        }
    }
}

/// Charges every request against the general budget.
pub async fn general_rate_limit(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state, EndpointClass::General, request, next).await
}

/// Charges login attempts against the stricter login budget.
pub async fn login_rate_limit(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(&state, EndpointClass::Login, request, next).await
}

async fn enforce(
    state: &RateLimitState,
    class: EndpointClass,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(
        request.headers(),
        peer_address(request.extensions()),
        state.trust_proxy_headers,
    );

    match state.limiter.check(class, &key).await {
        Ok(RateLimitDecision::Allowed { .. }) => next.run(request).await,
        Ok(RateLimitDecision::Limited { retry_after }) => {
            tracing::warn!(
                client = %key,
                class = class.as_str(),
                retry_after_secs = retry_after.as_secs(),
                "Rate limit exceeded"
            );
            AuthApiError::RateLimited { retry_after }.into_response()
        }
        Err(e) => {
            // Fail open.
            tracing::warn!(error = %e, class = class.as_str(), "Rate limiter unavailable, admitting request");
            next.run(request).await
        }
    }
}

/// Authorization gate for protected routes.
///
/// Rejects the request unless the validator accepts its credential, and
/// hands the resolved claims to the handler through request extensions.
pub async fn require_session<V>(
    State(validator): State<V>,
    request: Request,
    next: Next,
) -> Result<Response, AuthApiError>
where
    V: AuthValidator<RequestParts = http::request::Parts>,
    AuthApiError: From<V::Error>,
{
    let (parts, body) = request.into_parts();
    let claims = validator.validate(&parts).await?;

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
