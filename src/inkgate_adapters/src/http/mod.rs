pub mod client_key;
pub mod error;
pub mod middleware;
pub mod routes;

pub use client_key::client_key;
pub use error::{AuthApiError, ErrorKind, ErrorResponse};
pub use middleware::{RateLimitState, general_rate_limit, login_rate_limit, require_session};
