use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use inkgate_core::{
    ClientKey, EndpointClass, RateLimitDecision, RateLimitPolicy, RateLimiter, RateLimiterError,
};
use tokio::time::Instant;

// Stale windows are swept once every this many checks.
const SWEEP_INTERVAL: u64 = 1024;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u64,
}

/// Fixed-window counters held in process memory.
#[derive(Clone)]
pub struct DashMapRateLimiter {
    windows: Arc<DashMap<(EndpointClass, ClientKey), Window>>,
    login: RateLimitPolicy,
    general: RateLimitPolicy,
    checks: Arc<AtomicU64>,
}

impl DashMapRateLimiter {
    pub fn new(login: RateLimitPolicy, general: RateLimitPolicy) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            login,
            general,
            checks: Arc::new(AtomicU64::new(0)),
        }
    }

    fn policy(&self, class: EndpointClass) -> &RateLimitPolicy {
        match class {
            EndpointClass::Login => &self.login,
            EndpointClass::General => &self.general,
        }
    }

    fn sweep(&self, now: Instant) {
        self.windows.retain(|(class, _), window| {
            now.duration_since(window.started) < self.policy(*class).window
        });
    }
}

impl Default for DashMapRateLimiter {
    fn default() -> Self {
        Self::new(
            RateLimitPolicy::default_login(),
            RateLimitPolicy::default_general(),
        )
    }
}

#[async_trait::async_trait]
impl RateLimiter for DashMapRateLimiter {
    async fn check(
        &self,
        class: EndpointClass,
        client: &ClientKey,
    ) -> Result<RateLimitDecision, RateLimiterError> {
        let now = Instant::now();
        let policy = *self.policy(class);

        if self.checks.fetch_add(1, Ordering::Relaxed) % SWEEP_INTERVAL == SWEEP_INTERVAL - 1 {
            self.sweep(now);
        }

        let mut window = self
            .windows
            .entry((class, client.clone()))
            .or_insert(Window {
                started: now,
                count: 0,
            });

        if now.duration_since(window.started) >= policy.window {
            window.started = now;
            window.count = 0;
        }
        window.count += 1;

        let window_remaining = policy
            .window
            .saturating_sub(now.duration_since(window.started));
        Ok(RateLimitDecision::from_count(
            &policy,
            window.count,
            window_remaining,
        ))
    }
}
