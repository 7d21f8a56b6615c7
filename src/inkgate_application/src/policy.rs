use chrono::Duration;

/// Tunables shared by the auth flow use cases.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    pub verification_ttl: Duration,
    pub reset_ttl: Duration,
    /// Refuse login until the email address has been verified.
    pub require_verified_email: bool,
    /// Answer signup for a taken email like any other validation failure.
    pub conceal_account_existence: bool,
    /// Base URL the links in outgoing emails point at.
    pub frontend_url: String,
}

impl AuthPolicy {
    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/verify-email/{token}", self.frontend_url.trim_end_matches('/'))
    }

    pub fn reset_link(&self, token: &str) -> String {
        format!("{}/reset-password/{token}", self.frontend_url.trim_end_matches('/'))
    }
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            verification_ttl: Duration::hours(24),
            reset_ttl: Duration::hours(1),
            require_verified_email: true,
            conceal_account_existence: true,
            frontend_url: "http://localhost:3000".to_string(),
        }
    }
}
