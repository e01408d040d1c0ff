//! Upstream comic API client.
//!
//! Fetches single issue records from the xkcd JSON API.
//!
//! ### Endpoints
//!
//! - **Latest**: `{base_url}/info.0.json`
//! - **Issue**: `{base_url}/{id}/info.0.json`
//!
//! ### Outcomes
//!
//! - 2xx with a comic body: `RawComic`.
//! - 404 for an issue: `UpstreamError::NotFound`, kept apart from other
//!   failures so callers can answer "not found" instead of "bad gateway".
//! - Anything else (other statuses, transport errors, bad bodies): the
//!   remaining `UpstreamError` variants.
//!
//! One attempt per call; no retry at this layer.

pub mod error;
pub mod request;
pub mod response;

pub use error::UpstreamError;
pub use request::ComicRef;
pub use response::RawComic;

use async_trait::async_trait;
use comicproxy_core::AppConfig;
use reqwest::{StatusCode, header};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default base URL for the upstream API.
const DEFAULT_BASE_URL: &str = "https://xkcd.com";

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "comic-proxy/0.1";

/// Source of raw comic records.
///
/// The retrieval engine depends on this trait rather than on `XkcdClient`,
/// so tests can substitute an in-process fetcher.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch one raw record.
    async fn fetch(&self, target: ComicRef) -> Result<RawComic, UpstreamError>;
}

/// Upstream client configuration.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL (default: https://xkcd.com).
    pub base_url: String,
    /// User-agent string (default: comic-proxy/0.x).
    pub user_agent: String,
    /// Request timeout. None leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), user_agent: DEFAULT_USER_AGENT.to_string(), timeout: None }
    }
}

impl From<&AppConfig> for UpstreamConfig {
    fn from(config: &AppConfig) -> Self {
        Self { base_url: config.base_url.clone(), user_agent: config.user_agent.clone(), timeout: config.timeout() }
    }
}

/// reqwest-backed upstream client.
#[derive(Debug, Clone)]
pub struct XkcdClient {
    http: reqwest::Client,
    base_url: String,
}

impl XkcdClient {
    /// Create a new client with the given configuration.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let parsed = url::Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(UpstreamError::InvalidBaseUrl(format!("unsupported scheme: {}", parsed.scheme())));
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| UpstreamError::Network(Arc::new(e)))?;

        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// Full URL for a target.
    pub fn url_for(&self, target: ComicRef) -> String {
        format!("{}{}", self.base_url, target.path())
    }
}

#[async_trait]
impl Fetcher for XkcdClient {
    async fn fetch(&self, target: ComicRef) -> Result<RawComic, UpstreamError> {
        let start = Instant::now();
        let url = self.url_for(target);

        tracing::debug!("fetching {} from {}", target, url);

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("upstream response status for {}: {}", target, status);

        if status == StatusCode::NOT_FOUND
            && let ComicRef::Issue(id) = target
        {
            return Err(UpstreamError::NotFound(id));
        }

        if !status.is_success() {
            return Err(UpstreamError::HttpError { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let raw: RawComic = serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Parse(e.to_string()))?;

        tracing::debug!("fetched {} in {:?}", target, start.elapsed());

        Ok(raw)
    }
}
