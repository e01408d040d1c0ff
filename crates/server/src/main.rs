//! comic-proxy server entry point.
//!
//! Loads layered configuration, builds the upstream client and comic service,
//! and serves the REST API until ctrl-c.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use comicproxy_client::{ComicService, ServiceOptions, UpstreamConfig, XkcdClient};
use comicproxy_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod error;
mod middleware;
mod rate_limit;
mod routes;
mod state;
mod stats;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let addr = config.listen_addr()?;

    let client = XkcdClient::new(UpstreamConfig::from(&config)).context("failed to build upstream client")?;
    let comics = ComicService::new(Arc::new(client), ServiceOptions::from(&config));
    let app = routes::router(AppState::new(comics, &config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        upstream = %config.base_url,
        cache_ttl_secs = config.cache_ttl_secs,
        search_window = config.search_window,
        "comic-proxy listening"
    );

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("comic-proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutting down");
}
