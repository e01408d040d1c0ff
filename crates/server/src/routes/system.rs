//! Health, stats and the `/api` fallback.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::is_api_path;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    /// Seconds since startup.
    pub uptime: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_requests: u64,
    /// Whole seconds since startup.
    pub uptime: u64,
    pub endpoint_stats: BTreeMap<String, u64>,
    pub cached_entries: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.stats.uptime().as_secs_f64(),
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        total_requests: state.stats.total(),
        uptime: state.stats.uptime().as_secs(),
        endpoint_stats: state.stats.endpoints(),
        cached_entries: state.comics.cache_len().await,
    })
}

/// JSON 404 under `/api`, bare 404 elsewhere.
pub async fn fallback(uri: Uri) -> Response {
    let path = uri.path();
    if is_api_path(path) {
        return ApiError::EndpointNotFound { path: path.to_string() }.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
