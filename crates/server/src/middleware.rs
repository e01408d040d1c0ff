//! Request middleware: request ids, access logging, rate limiting and stats.

use std::net::SocketAddr;
use std::time::Instant;

use axum::body::Body;
use axum::extract::{ConnectInfo, MatchedPath, State};
use axum::http::{HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
const RATE_LIMIT_LIMIT_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const RATE_LIMIT_REMAINING_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Stats key shared by every request that matched no route.
pub const UNMATCHED_STATS_KEY: &str = "fallback";

/// True for `/api` itself and anything below it, never for `/apiary`.
pub fn is_api_path(path: &str) -> bool {
    path.strip_prefix("/api").is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().simple().to_string();
    request.extensions_mut().insert(RequestContext { request_id: request_id.clone() });

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

pub async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();
    let client = client_key(&request);
    let user_agent = request
        .headers()
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            request_id = %request_id,
            method = %method,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            status = status.as_u16(),
            elapsed_ms,
            client = %client,
            user_agent = %user_agent,
            "request failed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            request_id = %request_id,
            method = %method,
            path = %uri.path(),
            query = uri.query().unwrap_or(""),
            status = status.as_u16(),
            elapsed_ms,
            client = %client,
            user_agent = %user_agent,
            "client request error"
        );
    } else {
        tracing::info!(
            request_id = %request_id,
            method = %method,
            path = %uri.path(),
            status = status.as_u16(),
            elapsed_ms,
            client = %client,
            user_agent = %user_agent,
            "request completed"
        );
    }

    response
}

/// Per-client limit on `/api` routes.
pub async fn rate_limit(State(state): State<AppState>, request: Request<Body>, next: Next) -> Response {
    if !is_api_path(request.uri().path()) {
        return next.run(request).await;
    }

    let key = client_key(&request);
    let remaining = match state.rate_limiter.check(&key) {
        Ok(remaining) => remaining,
        Err(retry_after) => {
            tracing::debug!(client = %key, retry_after, "rate limit exceeded");
            return ApiError::RateLimited { retry_after }.into_response();
        }
    };

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(RATE_LIMIT_LIMIT_HEADER, HeaderValue::from(state.rate_limiter.limit()));
    headers.insert(RATE_LIMIT_REMAINING_HEADER, HeaderValue::from(remaining));
    response
}

/// Count the request under its path; unmatched paths share one bucket.
pub async fn record_stats(State(state): State<AppState>, request: Request<Body>, next: Next) -> Response {
    if request.extensions().get::<MatchedPath>().is_some() {
        state.stats.record(request.uri().path());
    } else {
        state.stats.record(UNMATCHED_STATS_KEY);
    }
    next.run(request).await
}

/// Client IP from the connection, or "unknown" when the server was not
/// started with connect info.
fn client_key(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
