pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    pub const APP_CONFIG_DIR_ENV_VAR: &str = "APP_CONFIG_DIR";
    pub const APP_ENV_PREFIX: &str = "APP";
    pub const APP_ENV_SEPARATOR: &str = "__";
}

pub const DEFAULT_CONFIG_DIR: &str = "config";

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub const JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hs256";
    pub const FRONTEND_URL: &str = "http://localhost:3000";
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "no-reply@inkgate.test";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
