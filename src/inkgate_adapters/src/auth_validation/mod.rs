pub mod jwt_session_tokens;
pub mod session_validator;

pub use jwt_session_tokens::{JwtSessionConfig, JwtSessionTokens};
pub use session_validator::{SessionAuthError, SessionValidator};
