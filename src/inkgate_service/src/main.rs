use color_eyre::eyre::Result;
use inkgate_adapters::{
    Argon2PasswordHasher, JwtSessionTokens, PostgresUserStore, config::Settings,
    http::RateLimitState,
};
use inkgate_service::{
    AuthService,
    helpers::{configure_email_client, configure_postgresql, configure_rate_limiter},
    tracing::init_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = Settings::load()?;
    init_tracing(settings.application.environment)?;

    let pg_pool = configure_postgresql(&settings.database).await?;
    let user_store = PostgresUserStore::new(pg_pool);

    let rate_limiter = configure_rate_limiter(&settings.rate_limit, &settings.redis).await?;
    let rate_limit = RateLimitState::new(rate_limiter, settings.application.trust_proxy_headers);

    let email_client = configure_email_client(&settings.email_client)?;
    let session_tokens = JwtSessionTokens::new(settings.auth.jwt_config());

    let auth_service = AuthService::new(
        user_store,
        Argon2PasswordHasher::default(),
        email_client,
        session_tokens,
        settings.auth.policy(),
        rate_limit,
    );

    let listener = tokio::net::TcpListener::bind(settings.application.address()).await?;
    tracing::info!(environment = settings.application.environment.as_str(), "Starting inkgate");

    auth_service
        .run_standalone(listener, Some(settings.auth.allowed_origins.clone()))
        .await?;

    Ok(())
}
