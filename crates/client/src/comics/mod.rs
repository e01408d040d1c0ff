//! Comic retrieval engine.
//!
//! `ComicService` owns the comic cache and answers the four public
//! operations: latest, by id, random, and search. Cache misses and expired
//! entries fall through to the upstream `Fetcher`; every fetched record is
//! normalized once before it is cached or returned.
//!
//! Failures are never cached, so a failed refresh leaves the previous entry
//! for that key untouched. Concurrent misses on one key may both fetch and
//! both store; the last write wins.

pub mod search;

#[cfg(test)]
pub(crate) mod stub;

pub use search::{Pagination, SearchQuery, SearchResult};

use std::sync::Arc;
use std::time::Duration;

use comicproxy_core::cache::DEFAULT_TTL;
use comicproxy_core::{AppConfig, CacheKey, Comic, ComicCache, Error};
use rand::Rng;

use crate::upstream::{ComicRef, Fetcher, UpstreamError};

/// Default number of ids below the latest one scanned by search.
pub const DEFAULT_SEARCH_WINDOW: u64 = 100;

/// Tuning for `ComicService`.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Freshness window for cached comics (default: 5 minutes).
    pub cache_ttl: Duration,
    /// Ids scanned below the latest one (default: 100).
    pub search_window: u64,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self { cache_ttl: DEFAULT_TTL, search_window: DEFAULT_SEARCH_WINDOW }
    }
}

impl From<&AppConfig> for ServiceOptions {
    fn from(config: &AppConfig) -> Self {
        Self { cache_ttl: config.cache_ttl(), search_window: config.search_window }
    }
}

/// Cached comic retrieval on top of an upstream fetcher.
///
/// Built once at startup and shared; clones share the same cache.
#[derive(Clone)]
pub struct ComicService {
    fetcher: Arc<dyn Fetcher>,
    cache: ComicCache,
    search_window: u64,
}

impl ComicService {
    /// Create a service with an empty cache.
    pub fn new(fetcher: Arc<dyn Fetcher>, options: ServiceOptions) -> Self {
        Self { fetcher, cache: ComicCache::new(options.cache_ttl), search_window: options.search_window }
    }

    /// Get the most recently published comic.
    pub async fn get_latest(&self) -> Result<Comic, Error> {
        if let Some(comic) = self.cache.get(CacheKey::Latest).await {
            return Ok(comic);
        }

        let raw = self
            .fetcher
            .fetch(ComicRef::Latest)
            .await
            .map_err(|e| Error::upstream("fetch latest comic", e))?;
        let comic = Comic::from(raw);

        self.cache.put(CacheKey::Latest, comic.clone()).await;
        Ok(comic)
    }

    /// Get a comic by its issue number.
    ///
    /// Non-positive ids fail with `Error::InvalidId` before any cache or
    /// network access.
    pub async fn get_by_id(&self, id: i64) -> Result<Comic, Error> {
        let issue = u64::try_from(id)
            .ok()
            .filter(|issue| *issue > 0)
            .ok_or_else(|| Error::InvalidId(format!("comic id must be a positive integer, got {id}")))?;

        self.get_issue(issue).await
    }

    /// Get a uniformly random comic between 1 and the latest issue.
    ///
    /// The drawn id goes through `get_by_id`, sharing its validation and cache.
    pub async fn get_random(&self) -> Result<Comic, Error> {
        let max_id = self.get_latest().await?.id;
        let id = random_id(max_id);

        tracing::debug!(id, max_id, "picked random comic");

        let id = i64::try_from(id).map_err(|_| Error::InvalidId(format!("comic id out of range: {id}")))?;
        self.get_by_id(id).await
    }

    /// Number of cached entries, fresh or expired.
    pub async fn cache_len(&self) -> usize {
        self.cache.len().await
    }

    /// Ids scanned below the latest one by `search`.
    pub fn search_window(&self) -> u64 {
        self.search_window
    }

    async fn get_issue(&self, id: u64) -> Result<Comic, Error> {
        let key = CacheKey::Comic(id);
        if let Some(comic) = self.cache.get(key).await {
            return Ok(comic);
        }

        let raw = self.fetcher.fetch(ComicRef::Issue(id)).await.map_err(|e| match e {
            UpstreamError::NotFound(_) => Error::NotFound(id),
            other => Error::upstream(format!("fetch comic {id}"), other),
        })?;
        let comic = Comic::from(raw);

        self.cache.put(key, comic.clone()).await;
        Ok(comic)
    }
}

/// Uniform draw from `1..=max_id`.
fn random_id(max_id: u64) -> u64 {
    rand::thread_rng().gen_range(1..=max_id.max(1))
}
