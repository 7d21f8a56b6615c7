//! # Inkgate - Account Service Library
//!
//! Facade crate re-exporting the public APIs of the inkgate components:
//! account signup with email verification, login with session tokens,
//! password reset, the session gate and rate limiting.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `OneTimeToken`, etc.
//! - **Ports**: `UserStore`, `EmailClient`, `PasswordHasher`, `SessionTokenService`, `RateLimiter`
//! - **Use cases**: `SignupUseCase`, `LoginUseCase`, `ResetPasswordUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `RedisRateLimiter`, `PostmarkEmailClient`, etc.
//! - **Service**: `AuthService` - assembles the HTTP router

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use inkgate_core::*;
}

pub use inkgate_core::{
    ClientKey, Email, EndpointClass, HashedPassword, Identity, OneTimeToken, Password,
    RateLimitDecision, RateLimitPolicy, SessionToken, TokenPurpose, User, UserError, UserId,
};

// ============================================================================
// Ports
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use inkgate_core::{UserStore, UserStoreError};
}

pub use inkgate_core::{
    AuthValidator, EmailClient, PasswordHasher, RateLimiter, SessionTokenService, UserStore,
    UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use inkgate_application::*;
}

pub use inkgate_application::{
    AuthFlowError, AuthPolicy, ForgotPasswordUseCase, LoginUseCase, ResendVerificationUseCase,
    ResetPasswordUseCase, SignupUseCase, VerifyEmailUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP routes, middleware and the API error
    pub mod http {
        pub use inkgate_adapters::http::*;
    }

    /// Persistence and rate limiter implementations
    pub mod persistence {
        pub use inkgate_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use inkgate_adapters::email::*;
    }

    /// Session tokens and the session gate validator
    pub mod auth {
        pub use inkgate_adapters::auth_validation::*;
    }

    /// Configuration
    pub mod config {
        pub use inkgate_adapters::config::*;
    }
}

pub use inkgate_adapters::{
    Argon2PasswordHasher, DashMapRateLimiter, HashMapUserStore, JwtSessionTokens,
    MockEmailClient, PostgresUserStore, PostmarkEmailClient, RedisRateLimiter, SessionValidator,
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

pub use inkgate_service::{
    AuthService,
    helpers::{configure_postgresql, configure_rate_limiter, configure_redis, get_redis_client},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
