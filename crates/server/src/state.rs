use std::sync::Arc;

use comicproxy_client::ComicService;
use comicproxy_core::AppConfig;

use crate::rate_limit::ApiRateLimiter;
use crate::stats::RequestStats;

/// Shared state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub comics: ComicService,
    pub stats: Arc<RequestStats>,
    pub rate_limiter: Arc<ApiRateLimiter>,
}

impl AppState {
    pub fn new(comics: ComicService, config: &AppConfig) -> Self {
        Self {
            comics,
            stats: Arc::new(RequestStats::new()),
            rate_limiter: Arc::new(ApiRateLimiter::new(config.rate_limit_window(), config.rate_limit_max_requests)),
        }
    }
}
