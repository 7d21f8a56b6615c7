use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, File};
use inkgate_application::AuthPolicy;
use inkgate_core::RateLimitPolicy;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::{
    auth_validation::JwtSessionConfig,
    config::constants::{DEFAULT_CONFIG_DIR, env},
};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub redis: RedisSettings,
    pub auth: AuthSettings,
    pub rate_limit: RateLimitSettings,
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// Take the client address from `X-Forwarded-For` instead of the socket peer.
    #[serde(default)]
    pub trust_proxy_headers: bool,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub session_ttl_seconds: i64,
    pub verification_ttl_seconds: i64,
    pub reset_ttl_seconds: i64,
    pub require_verified_email: bool,
    pub conceal_account_existence: bool,
    pub frontend_url: String,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

impl AuthSettings {
    pub fn policy(&self) -> AuthPolicy {
        AuthPolicy {
            verification_ttl: chrono::Duration::seconds(self.verification_ttl_seconds),
            reset_ttl: chrono::Duration::seconds(self.reset_ttl_seconds),
            require_verified_email: self.require_verified_email,
            conceal_account_existence: self.conceal_account_existence,
            frontend_url: self.frontend_url.clone(),
        }
    }

    pub fn jwt_config(&self) -> JwtSessionConfig {
        JwtSessionConfig {
            jwt_secret: self.jwt_secret.clone(),
            token_ttl_in_seconds: self.session_ttl_seconds,
        }
    }
}

/// Origins allowed to call the service from a browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitBackend {
    Memory,
    Redis,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PolicySettings {
    pub max_requests: u32,
    pub window_seconds: u64,
}

impl From<PolicySettings> for RateLimitPolicy {
    fn from(value: PolicySettings) -> Self {
        RateLimitPolicy::new(value.max_requests, Duration::from_secs(value.window_seconds))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    pub backend: RateLimitBackend,
    pub login: PolicySettings,
    pub general: PolicySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

impl Settings {
    /// Load settings from the config directory and `APP_*` environment variables.
    ///
    /// The directory defaults to `./config` and can be moved with `APP_CONFIG_DIR`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config_dir = std::env::var(env::APP_CONFIG_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let environment: Environment = std::env::var(env::APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(ConfigError::Message)?;

        Self::load_from(&config_dir, environment)
    }

    /// Load settings for `environment` from `config_dir`.
    ///
    /// No signing secret is committed for production, so `APP_AUTH__JWT_SECRET`
    /// must be set there. An empty secret is rejected everywhere.
    pub fn load_from(config_dir: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::from(config_dir.join("base.json")))
            .add_source(
                File::from(config_dir.join(format!("{}.json", environment.as_str())))
                    .required(false),
            )
            .set_override("application.environment", environment.as_str())?
            .add_source(
                config::Environment::with_prefix(env::APP_ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(env::APP_ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.auth.ensure_signing_secret()?;
        Ok(settings)
    }
}

impl AuthSettings {
    fn ensure_signing_secret(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.expose_secret().trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt_secret must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
