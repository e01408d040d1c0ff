//! `/api/comics` handlers.
//!
//! Path and query strings are coerced to integers here; the service only
//! ever sees typed values.

use axum::Json;
use axum::extract::{Path, Query, State};
use comicproxy_client::{SearchQuery, SearchResult};
use comicproxy_core::Comic;
use serde::Deserialize;

use crate::error::{ApiError, INVALID_ID_MESSAGE};
use crate::state::AppState;

const MAX_QUERY_CHARS: usize = 100;

pub async fn latest(State(state): State<AppState>) -> Result<Json<Comic>, ApiError> {
    Ok(Json(state.comics.get_latest().await?))
}

pub async fn random(State(state): State<AppState>) -> Result<Json<Comic>, ApiError> {
    Ok(Json(state.comics.get_random().await?))
}

pub async fn by_id(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Json<Comic>, ApiError> {
    let id = parse_comic_id(&raw_id)?;
    Ok(Json(state.comics.get_by_id(id).await?))
}

/// Raw search parameters; kept as strings so each one gets its own message.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

pub async fn search(
    State(state): State<AppState>, Query(params): Query<SearchParams>,
) -> Result<Json<SearchResult>, ApiError> {
    let query = params.into_query()?;
    Ok(Json(state.comics.search(&query).await?))
}

fn parse_comic_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::Validation(INVALID_ID_MESSAGE.to_string())),
    }
}

impl SearchParams {
    /// Validate in order q, page, limit; the first failure wins.
    fn into_query(self) -> Result<SearchQuery, ApiError> {
        let q = self.q.as_deref().unwrap_or("").trim();
        let chars = q.chars().count();
        if chars == 0 || chars > MAX_QUERY_CHARS {
            return Err(ApiError::Validation(format!(
                "Query must be between 1 and {MAX_QUERY_CHARS} characters"
            )));
        }

        let mut query = SearchQuery::new(q);

        if let Some(page) = self.page.as_deref() {
            match page.trim().parse::<u32>() {
                Ok(page) if page >= 1 => query = query.with_page(page),
                _ => return Err(ApiError::Validation("Page must be a positive integer".to_string())),
            }
        }

        if let Some(limit) = self.limit.as_deref() {
            match limit.trim().parse::<u32>() {
                Ok(limit) if (1..=50).contains(&limit) => query = query.with_limit(limit),
                _ => return Err(ApiError::Validation("Limit must be between 1 and 50".to_string())),
            }
        }

        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(q: Option<&str>, page: Option<&str>, limit: Option<&str>) -> SearchParams {
        SearchParams { q: q.map(String::from), page: page.map(String::from), limit: limit.map(String::from) }
    }

    fn message(err: ApiError) -> String {
        match err {
            ApiError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_comic_id() {
        assert_eq!(parse_comic_id("353").unwrap(), 353);
        for raw in ["0", "-5", "1.5", "abc", "", "99999999999999999999"] {
            assert_eq!(message(parse_comic_id(raw).unwrap_err()), INVALID_ID_MESSAGE, "{raw:?}");
        }
    }

    #[test]
    fn test_search_params_defaults_and_trim() {
        let query = params(Some("  robot  "), None, None).into_query().unwrap();
        assert_eq!(query.query, "robot");
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_search_params_query_length() {
        for q in [None, Some(""), Some("   ")] {
            let err = params(q, None, None).into_query().unwrap_err();
            assert_eq!(message(err), "Query must be between 1 and 100 characters");
        }

        let long = "x".repeat(101);
        assert!(params(Some(&long), None, None).into_query().is_err());
        assert!(params(Some(&"x".repeat(100)), None, None).into_query().is_ok());
    }

    #[test]
    fn test_search_params_page_and_limit() {
        for page in ["0", "-1", "two", "1.5"] {
            let err = params(Some("robot"), Some(page), None).into_query().unwrap_err();
            assert_eq!(message(err), "Page must be a positive integer");
        }
        for limit in ["0", "51", "ten"] {
            let err = params(Some("robot"), None, Some(limit)).into_query().unwrap_err();
            assert_eq!(message(err), "Limit must be between 1 and 50");
        }

        let query = params(Some("robot"), Some("3"), Some("50")).into_query().unwrap();
        assert_eq!((query.page, query.limit), (3, 50));
    }

    #[test]
    fn test_search_params_first_failure_wins() {
        let err = params(Some(""), Some("0"), Some("0")).into_query().unwrap_err();
        assert_eq!(message(err), "Query must be between 1 and 100 characters");

        let err = params(Some("robot"), Some("0"), Some("0")).into_query().unwrap_err();
        assert_eq!(message(err), "Page must be a positive integer");
    }
}
