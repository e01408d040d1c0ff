//! Core types and shared functionality for comic-proxy.
//!
//! This crate provides:
//! - The normalized `Comic` record
//! - In-memory TTL cache for comics
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod comic;
pub mod config;
pub mod error;

pub use cache::{CacheKey, ComicCache};
pub use comic::Comic;
pub use config::{AppConfig, ConfigError};
pub use error::Error;
