pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    one_time_token::{IssuedToken, OneTimeToken, OneTimeTokenError, TokenDigest, TokenPurpose},
    password::{HashedPassword, Password},
    rate_limit::{ClientKey, EndpointClass, RateLimitDecision, RateLimitPolicy},
    session::{Identity, SessionClaims, SessionToken},
    user::{User, UserError, UserParts},
    user_id::UserId,
};

pub use ports::{
    repositories::{UserStore, UserStoreError},
    services::{
        EmailClient, EmailMessage, PasswordHasher, PasswordHasherError, RateLimiter, RateLimiterError,
        SessionTokenError, SessionTokenService,
    },
};

pub use strategies::auth_validator::AuthValidator;
