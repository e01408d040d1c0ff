//! In-memory cache for normalized comics.
//!
//! Entries live in a process-wide map owned by the retrieval engine. It supports:
//!
//! - Distinct keys for the "latest" slot and for each issue id
//! - Time-based freshness: expired entries are reported as absent
//! - Overwrite on refresh, no eviction (the map grows for the process lifetime)

pub mod key;
pub mod store;

pub use key::CacheKey;
pub use store::{ComicCache, DEFAULT_TTL};
