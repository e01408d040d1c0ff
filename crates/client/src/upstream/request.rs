//! Upstream request targets.

use std::fmt;

/// Which upstream record to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComicRef {
    /// The most recently published issue.
    Latest,
    /// A specific issue by number.
    Issue(u64),
}

impl ComicRef {
    /// Path of the JSON record relative to the upstream base URL.
    pub fn path(&self) -> String {
        match self {
            ComicRef::Latest => "/info.0.json".to_string(),
            ComicRef::Issue(id) => format!("/{id}/info.0.json"),
        }
    }
}

impl fmt::Display for ComicRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComicRef::Latest => f.write_str("latest comic"),
            ComicRef::Issue(id) => write!(f, "comic {id}"),
        }
    }
}
