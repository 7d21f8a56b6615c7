use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use inkgate_adapters::{
    DashMapRateLimiter, PostmarkEmailClient, RedisRateLimiter,
    config::{DatabaseSettings, EmailClientSettings, RateLimitBackend, RateLimitSettings, RedisSettings},
};
use inkgate_core::{Email, RateLimitPolicy, RateLimiter};
use redis::{Client, RedisResult, aio::ConnectionManager};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Connect to PostgreSQL and apply pending migrations.
pub async fn configure_postgresql(settings: &DatabaseSettings) -> Result<PgPool> {
    let pg_pool = get_postgres_pool(settings.url.expose_secret())
        .await
        .wrap_err("Failed to create Postgres connection pool")?;

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .wrap_err("Failed to run migrations")?;

    Ok(pg_pool)
}

pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}

pub async fn configure_redis(settings: &RedisSettings) -> Result<ConnectionManager> {
    get_redis_client(&settings.host_name)
        .wrap_err("Failed to get Redis client")?
        .get_connection_manager()
        .await
        .wrap_err("Failed to get Redis connection")
}

pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{redis_hostname}/");
    redis::Client::open(redis_url)
}

/// Build the configured rate limiter backend.
///
/// The memory backend counts per process. Run the Redis backend when
/// several instances share one budget.
pub async fn configure_rate_limiter(
    settings: &RateLimitSettings,
    redis: &RedisSettings,
) -> Result<Arc<dyn RateLimiter>> {
    let login: RateLimitPolicy = settings.login.into();
    let general: RateLimitPolicy = settings.general.into();

    let limiter: Arc<dyn RateLimiter> = match settings.backend {
        RateLimitBackend::Memory => Arc::new(DashMapRateLimiter::new(login, general)),
        RateLimitBackend::Redis => {
            let conn = configure_redis(redis).await?;
            Arc::new(RedisRateLimiter::new(conn, login, general))
        }
    };

    tracing::info!(backend = ?settings.backend, "Rate limiter configured");
    Ok(limiter)
}

pub fn configure_email_client(settings: &EmailClientSettings) -> Result<PostmarkEmailClient> {
    let http_client = reqwest::Client::builder()
        .timeout(settings.timeout())
        .build()
        .wrap_err("Failed to build the email HTTP client")?;

    let sender = Email::parse(&settings.sender).wrap_err("Invalid email_client.sender")?;

    PostmarkEmailClient::new(
        &settings.base_url,
        sender,
        settings.auth_token.clone(),
        http_client,
    )
    .map_err(|e| eyre!(e))
}
