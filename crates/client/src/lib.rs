//! Client code for comic-proxy.
//!
//! This crate provides the upstream HTTP client and the cached retrieval
//! engine (latest, by id, random, search) used by the server.

pub mod comics;
pub mod upstream;

pub use comics::{ComicService, Pagination, SearchQuery, SearchResult, ServiceOptions};

pub use upstream::{ComicRef, Fetcher, RawComic, UpstreamConfig, UpstreamError, XkcdClient};
