pub mod dashmap_rate_limiter;
pub mod hashmap_user_store;
pub mod postgres_user_store;
pub mod redis_rate_limiter;

pub use dashmap_rate_limiter::DashMapRateLimiter;
pub use hashmap_user_store::HashMapUserStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_rate_limiter::RedisRateLimiter;
