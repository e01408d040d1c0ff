//! Process-wide request counters.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

/// Request totals since startup, per path and overall.
#[derive(Debug)]
pub struct RequestStats {
    started: Instant,
    total: AtomicU64,
    endpoints: DashMap<String, u64>,
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestStats {
    pub fn new() -> Self {
        Self { started: Instant::now(), total: AtomicU64::new(0), endpoints: DashMap::new() }
    }

    pub fn record(&self, path: &str) {
        self.total.fetch_add(1, Ordering::Relaxed);
        *self.endpoints.entry(path.to_string()).or_insert(0) += 1;
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Per-path counts, sorted by path.
    pub fn endpoints(&self) -> BTreeMap<String, u64> {
        self.endpoints.iter().map(|e| (e.key().clone(), *e.value())).collect()
    }
}
