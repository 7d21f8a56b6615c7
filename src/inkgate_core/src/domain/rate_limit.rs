use std::fmt;
use std::time::Duration;

/// Which counter a request is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointClass {
    Login,
    General,
}

impl EndpointClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointClass::Login => "login",
            EndpointClass::General => "general",
        }
    }
}

/// Identity of the caller for rate limiting purposes (usually an IP address).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

impl ClientKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn unknown() -> Self {
        Self("unknown".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// At most `max_requests` per fixed `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub const fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    pub const fn default_login() -> Self {
        Self::new(5, Duration::from_secs(15 * 60))
    }

    pub const fn default_general() -> Self {
        Self::new(1000, Duration::from_secs(60 * 60))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateLimitDecision {
    /// Decide from the request count within the current window.
    pub fn from_count(policy: &RateLimitPolicy, count: u64, window_remaining: Duration) -> Self {
        if count > u64::from(policy.max_requests) {
            RateLimitDecision::Limited {
                retry_after: window_remaining.max(Duration::from_secs(1)),
            }
        } else {
            RateLimitDecision::Allowed {
                remaining: policy.max_requests - count as u32,
            }
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}
