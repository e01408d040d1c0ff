//! Sliding-window rate limiter keyed by client address.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct ApiRateLimiter {
    window: Duration,
    max_requests: u32,
    buckets: Arc<DashMap<String, Vec<Instant>>>,
}

impl ApiRateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self { window, max_requests, buckets: Arc::new(DashMap::new()) }
    }

    /// Record a request for `key`.
    ///
    /// Returns the remaining budget when allowed, or the seconds until the
    /// oldest request in the window expires when rejected.
    pub fn check(&self, key: &str) -> Result<u32, u64> {
        let now = Instant::now();
        let window = self.window;

        let mut entry = self.buckets.entry(key.to_string()).or_default();
        entry.retain(|instant| now.duration_since(*instant) < window);

        let remaining = self.max_requests.saturating_sub(entry.len() as u32);
        if remaining == 0 {
            let retry_after = entry
                .first()
                .map(|oldest| window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(window);
            return Err(ceil_secs(retry_after));
        }

        entry.push(now);
        // after push, one fewer slot remains
        Ok(remaining.saturating_sub(1))
    }

    pub fn limit(&self) -> u32 {
        self.max_requests
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    secs.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_rejects_over_budget() {
        let limiter = ApiRateLimiter::new(Duration::from_secs(60), 3);

        assert_eq!(limiter.check("10.0.0.1"), Ok(2));
        assert_eq!(limiter.check("10.0.0.1"), Ok(1));
        assert_eq!(limiter.check("10.0.0.1"), Ok(0));
        assert_eq!(limiter.check("10.0.0.1"), Err(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clients_are_independent() {
        let limiter = ApiRateLimiter::new(Duration::from_secs(60), 1);

        assert!(limiter.check("10.0.0.1").is_ok());
        assert!(limiter.check("10.0.0.1").is_err());
        assert!(limiter.check("10.0.0.2").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_slides() {
        let limiter = ApiRateLimiter::new(Duration::from_secs(60), 2);

        limiter.check("a").unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        limiter.check("a").unwrap();

        tokio::time::advance(Duration::from_millis(29_500)).await;
        assert_eq!(limiter.check("a"), Err(1));

        tokio::time::advance(Duration::from_millis(500)).await;
        assert_eq!(limiter.check("a"), Ok(0));
        assert_eq!(limiter.check("a"), Err(30));
    }

    #[test]
    fn test_ceil_secs() {
        assert_eq!(ceil_secs(Duration::ZERO), 1);
        assert_eq!(ceil_secs(Duration::from_millis(1_001)), 2);
        assert_eq!(ceil_secs(Duration::from_secs(900)), 900);
    }
}
