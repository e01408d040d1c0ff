//! TTL-bounded comic store.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use super::key::CacheKey;
use crate::Comic;

/// Default freshness window (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Cached comic with the instant it was stored.
#[derive(Debug, Clone)]
struct CacheEntry {
    comic: Comic,
    stored_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// In-memory comic cache.
///
/// Uses a HashMap behind a tokio RwLock. Locks are held only for the map
/// access itself, never across an upstream request. Cloning the cache yields
/// a handle to the same map.
#[derive(Debug, Clone)]
pub struct ComicCache {
    entries: Arc<RwLock<HashMap<CacheKey, CacheEntry>>>,
    ttl: Duration,
}

impl Default for ComicCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ComicCache {
    /// Create an empty cache with the given freshness window.
    pub fn new(ttl: Duration) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    /// Freshness window applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a fresh comic for the key.
    ///
    /// Returns None if the key was never stored or its entry has expired.
    /// Expired entries stay in the map until the next `put` overwrites them.
    pub async fn get(&self, key: CacheKey) -> Option<Comic> {
        let entries = self.entries.read().await;
        match entries.get(&key) {
            Some(entry) if entry.is_fresh(self.ttl) => {
                tracing::debug!(%key, "cache hit");
                Some(entry.comic.clone())
            }
            Some(_) => {
                tracing::debug!(%key, "cache entry expired");
                None
            }
            None => {
                tracing::debug!(%key, "cache miss");
                None
            }
        }
    }

    /// Store a comic under the key, replacing any previous entry.
    pub async fn put(&self, key: CacheKey, comic: Comic) {
        let mut entries = self.entries.write().await;
        entries.insert(key, CacheEntry { comic, stored_at: Instant::now() });
    }

    /// Number of stored entries, fresh or expired.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
