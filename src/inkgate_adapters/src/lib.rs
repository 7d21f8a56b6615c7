pub mod auth_validation;
pub mod config;
pub mod email;
pub mod hashing;
pub mod http;
pub mod persistence;

pub use auth_validation::{JwtSessionConfig, JwtSessionTokens, SessionAuthError, SessionValidator};
pub use email::{MockEmailClient, PostmarkEmailClient};
pub use hashing::Argon2PasswordHasher;
pub use persistence::{DashMapRateLimiter, HashMapUserStore, PostgresUserStore, RedisRateLimiter};
