//! Window scan search with pagination.
//!
//! Upstream has no full-text index, so search walks the most recent issues:
//! `[max(1, latest - window), latest]`, fetched one at a time through the
//! cache. An issue that fails to load is skipped; only failing to establish
//! the latest id aborts the search.

use comicproxy_core::{Comic, Error};
use serde::{Deserialize, Serialize};

use super::ComicService;

/// Default page size.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 50;

/// Search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Case-sensitive substring matched against title and transcript.
    pub query: String,
    /// 1-based page number.
    pub page: u32,
    /// Results per page (1-50).
    pub limit: u32,
}

impl SearchQuery {
    /// Query for the first page with the default limit.
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), page: 1, limit: DEFAULT_LIMIT }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Validate pagination parameters. The query text itself may be empty.
    pub fn validate(&self) -> Result<(), Error> {
        if self.page == 0 {
            return Err(Error::InvalidInput("page must be a positive integer".to_string()));
        }

        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(Error::InvalidInput(format!("limit must be between 1 and {MAX_LIMIT}")));
        }

        Ok(())
    }

    /// Index of the first result on the requested page.
    fn offset(&self) -> usize {
        (self.page as usize).saturating_sub(1).saturating_mul(self.limit as usize)
    }
}

/// One page of search matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub results: Vec<Comic>,
    /// Matches in the whole window, not just this page.
    pub total: usize,
    pub pagination: Pagination,
}

/// Pagination parameters echoed back with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl SearchResult {
    /// Slice the requested page out of the full match list.
    ///
    /// An offset past the end yields an empty page.
    pub fn paginate(query: &SearchQuery, matches: Vec<Comic>) -> Self {
        let total = matches.len();
        let results = matches
            .into_iter()
            .skip(query.offset())
            .take(query.limit as usize)
            .collect();

        Self {
            query: query.query.clone(),
            results,
            total,
            pagination: Pagination { page: query.page, limit: query.limit },
        }
    }
}

impl ComicService {
    /// Search recent comics by title or transcript.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult, Error> {
        query.validate()?;

        let max_id = self.get_latest().await?.id;
        let start = max_id.saturating_sub(self.search_window()).max(1);

        tracing::debug!(query = %query.query, start, max_id, "scanning search window");

        let mut matches = Vec::new();
        let mut skipped = 0usize;
        for id in start..=max_id {
            match self.get_issue(id).await {
                Ok(comic) if comic.matches(&query.query) => matches.push(comic),
                Ok(_) => {}
                Err(Error::NotFound(_)) => {
                    tracing::debug!(id, "comic missing upstream, skipping");
                    skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(id, error = %e, "failed to load comic during search, skipping");
                    skipped += 1;
                }
            }
        }

        tracing::debug!(total = matches.len(), skipped, "search scan complete");

        Ok(SearchResult::paginate(query, matches))
    }
}
