use std::net::SocketAddr;

use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use inkgate_adapters::{
    SessionValidator,
    config::AllowedOrigins,
    http::{
        RateLimitState, general_rate_limit, login_rate_limit, require_session,
        routes::{
            forgot_password, login, me, resend_verification, reset_password, signup, verify_email,
        },
    },
};
use inkgate_application::AuthPolicy;
use inkgate_core::{EmailClient, PasswordHasher, SessionTokenService, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The auth HTTP service: flow routes, the session gate and rate limits.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Assemble the routes.
    ///
    /// Each route is given only the state it needs. The login route carries
    /// its own rate limit on top of the general one, and `/me` sits behind
    /// the session gate.
    pub fn new<U, H, E, T>(
        user_store: U,
        password_hasher: H,
        email_client: E,
        session_tokens: T,
        policy: AuthPolicy,
        rate_limit: RateLimitState,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        E: EmailClient + Clone + 'static,
        T: SessionTokenService + Clone + 'static,
    {
        let validator = SessionValidator::new(user_store.clone(), session_tokens.clone());

        let login_route = Router::new()
            .route("/login", post(login::<U, H, T>))
            .with_state((
                user_store.clone(),
                password_hasher.clone(),
                session_tokens,
                policy.clone(),
            ))
            .route_layer(from_fn_with_state(rate_limit.clone(), login_rate_limit));

        let me_route = Router::new()
            .route("/me", get(me))
            .route_layer(from_fn_with_state(
                validator,
                require_session::<SessionValidator<U, T>>,
            ));

        let router = Router::new()
            .route("/signup", post(signup::<U, H, E>))
            .with_state((
                user_store.clone(),
                password_hasher.clone(),
                email_client.clone(),
                policy.clone(),
            ))
            .route("/forgot-password", post(forgot_password::<U, E>))
            .with_state((user_store.clone(), email_client.clone(), policy.clone()))
            .route("/reset-password/{token}", patch(reset_password::<U, H>))
            .with_state((user_store.clone(), password_hasher))
            .route("/verify-email/{token}", get(verify_email::<U>))
            .with_state(user_store.clone())
            .route("/resend-verification", post(resend_verification::<U, E>))
            .with_state((user_store, email_client, policy))
            .merge(login_route)
            .merge(me_route)
            .layer(from_fn_with_state(rate_limit, general_rate_limit));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router: CORS for the given origins, then request tracing
    /// as the outermost layer.
    pub fn router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server
    ///
    /// The peer address is recorded on every request so the rate limits
    /// can key on it.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum_server::Server::<SocketAddr>::from_listener(listener)
            .serve(router.into_make_service_with_connect_info::<SocketAddr>())
            .await
    }
}
