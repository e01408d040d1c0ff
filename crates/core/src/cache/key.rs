//! Cache key naming.

use std::fmt;

/// Key for a cached comic.
///
/// The latest comic occupies its own slot, so caching issue 5 never satisfies
/// a lookup for "latest" even when 5 is the newest issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Latest,
    Comic(u64),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Latest => f.write_str("latest"),
            CacheKey::Comic(id) => write!(f, "comic_{id}"),
        }
    }
}
