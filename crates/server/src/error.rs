//! HTTP errors for the comic-proxy server.
//!
//! Maps service errors and request validation failures onto status codes and
//! JSON bodies.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use comicproxy_core::Error;
use serde::Serialize;

/// Message used for every rejected comic id.
pub const INVALID_ID_MESSAGE: &str = "Comic ID must be a positive integer";

/// Errors surfaced by route handlers and middleware.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed path or query parameter; the message is returned as `error`.
    #[error("{0}")]
    Validation(String),

    /// Error returned by the comic service.
    #[error(transparent)]
    Service(#[from] Error),

    /// No route under `/api` matched.
    #[error("Endpoint not found")]
    EndpointNotFound { path: String },

    /// Client exceeded its request budget.
    #[error("Too many requests, please try again later")]
    RateLimited { retry_after: u64 },
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self { error: error.into(), message: None, path: None }
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Service(Error::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(_) => StatusCode::BAD_GATEWAY,
            ApiError::EndpointNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(msg) => ErrorBody::new(msg.as_str()),
            ApiError::Service(err) => match err {
                Error::InvalidId(_) => ErrorBody::new("Invalid comic ID").with_message(INVALID_ID_MESSAGE),
                Error::InvalidInput(msg) => ErrorBody::new("Validation Error").with_message(msg.as_str()),
                Error::NotFound(_) => {
                    ErrorBody::new("Comic not found").with_message("The requested comic does not exist.")
                }
                Error::Upstream { .. } => ErrorBody::new("Upstream error").with_message(err.to_string()),
            },
            ApiError::EndpointNotFound { path } => {
                ErrorBody { error: self.to_string(), message: None, path: Some(path.clone()) }
            }
            ApiError::RateLimited { .. } => ErrorBody::new(self.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Service(err) = &self
            && status.is_server_error()
        {
            tracing::error!(status = status.as_u16(), code = err.code(), error = %err, "comic service failed");
        }

        let mut response = (status, Json(self.body())).into_response();
        if let ApiError::RateLimited { retry_after } = self
            && let Ok(value) = HeaderValue::from_str(&retry_after.to_string())
        {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value, Option<String>) {
        let response = error.into_response();
        let status = response.status();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap(), retry_after)
    }

    #[tokio::test]
    async fn test_service_error_mapping() {
        let (status, body, _) = body_json(Error::InvalidId("id -1".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid comic ID");
        assert_eq!(body["message"], INVALID_ID_MESSAGE);

        let (status, body, _) = body_json(Error::InvalidInput("limit must be between 1 and 50".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "limit must be between 1 and 50");

        let (status, body, _) = body_json(Error::NotFound(404).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Comic not found");

        let (status, body, _) = body_json(Error::upstream("fetch comic 5", "HTTP error: 500").into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Upstream error");
        assert!(body["message"].as_str().unwrap().contains("fetch comic 5"));
    }

    #[tokio::test]
    async fn test_validation_body_has_only_error() {
        let (status, body, _) = body_json(ApiError::Validation("Page must be a positive integer".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Page must be a positive integer" }));
    }

    #[tokio::test]
    async fn test_endpoint_not_found_echoes_path() {
        let (status, body, _) = body_json(ApiError::EndpointNotFound { path: "/api/nope".into() }).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Endpoint not found", "path": "/api/nope" }));
    }

    #[tokio::test]
    async fn test_rate_limited_sets_retry_after() {
        let (status, body, retry_after) = body_json(ApiError::RateLimited { retry_after: 42 }).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "Too many requests, please try again later");
        assert_eq!(retry_after.as_deref(), Some("42"));
    }
}
