use std::time::Duration;

use inkgate_core::{
    ClientKey, EndpointClass, RateLimitDecision, RateLimitPolicy, RateLimiter, RateLimiterError,
};
use redis::aio::ConnectionManager;

/// Fixed-window counters shared through Redis, for running several instances.
///
/// The connection manager multiplexes concurrent checks over one connection
/// and reconnects on failure.
#[derive(Clone)]
pub struct RedisRateLimiter {
    conn: ConnectionManager,
    login: RateLimitPolicy,
    general: RateLimitPolicy,
}

impl RedisRateLimiter {
    pub fn new(
        conn: ConnectionManager,
        login: RateLimitPolicy,
        general: RateLimitPolicy,
    ) -> Self {
        Self {
            conn,
            login,
            general,
        }
    }
}

#[async_trait::async_trait]
impl RateLimiter for RedisRateLimiter {
    #[tracing::instrument(name = "Checking rate limit in Redis", skip_all)]
    async fn check(
        &self,
        class: EndpointClass,
        client: &ClientKey,
    ) -> Result<RateLimitDecision, RateLimiterError> {
        let policy = match class {
            EndpointClass::Login => self.login,
            EndpointClass::General => self.general,
        };
        let key = get_key(class, client);
        let window_secs = policy.window.as_secs().max(1);

        // The window starts with the first request; later requests only count.
        let mut conn = self.conn.clone();
        let (count, ttl): (u64, i64) = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&key)
            .arg(0)
            .arg("EX")
            .arg(window_secs)
            .arg("NX")
            .ignore()
            .incr(&key, 1)
            .ttl(&key)
            .query_async(&mut conn)
            .await
            .map_err(|e| RateLimiterError::Backend(e.to_string()))?;

        let window_remaining = Duration::from_secs(u64::try_from(ttl).unwrap_or(window_secs));
        Ok(RateLimitDecision::from_count(
            &policy,
            count,
            window_remaining,
        ))
    }
}

const RATE_LIMIT_KEY_PREFIX: &str = "rate_limit:";

fn get_key(class: EndpointClass, client: &ClientKey) -> String {
    format!("{}{}:{}", RATE_LIMIT_KEY_PREFIX, class.as_str(), client)
}
