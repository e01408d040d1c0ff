//! HTTP routes for comic-proxy.
//!
//! All JSON endpoints live under `/api`. Middleware runs outermost first:
//! security headers, request id, access log, rate limit (only `/api`), stats.

pub mod comics;
pub mod system;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, header};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::middleware::{log_requests, rate_limit, record_stats, set_request_context};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/comics/latest", get(comics::latest))
        .route("/api/comics/random", get(comics::random))
        .route("/api/comics/search", get(comics::search))
        .route("/api/comics/{id}", get(comics::by_id))
        .route("/api/health", get(system::health))
        .route("/api/stats", get(system::stats))
        .fallback(system::fallback)
        .layer(from_fn_with_state(state.clone(), record_stats))
        .layer(from_fn_with_state(state.clone(), rate_limit))
        .layer(from_fn(log_requests))
        .layer(from_fn(set_request_context))
        .layer(security_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .layer(security_header(header::X_FRAME_OPTIONS, "SAMEORIGIN"))
        .layer(security_header(header::REFERRER_POLICY, "no-referrer"))
        .layer(security_header(header::X_DNS_PREFETCH_CONTROL, "off"))
        .layer(security_header(HeaderName::from_static("cross-origin-resource-policy"), "same-origin"))
        .with_state(state)
}

/// Add a header unless the handler already set it.
fn security_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}
