//! In-process fetcher for service tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::upstream::{ComicRef, Fetcher, RawComic, UpstreamError};

pub(crate) fn raw(num: u64, title: &str, transcript: Option<&str>) -> RawComic {
    RawComic {
        num,
        title: title.to_string(),
        img: format!("https://imgs.xkcd.com/comics/{num}.png"),
        alt: format!("alt {num}"),
        transcript: transcript.map(str::to_string),
        year: 2024,
        month: 1,
        day: 1,
        safe_title: title.to_string(),
        link: String::new(),
        news: String::new(),
    }
}

/// Serves comics from a map and records every request.
///
/// Ids missing from the map answer `NotFound`; ids marked failing answer HTTP 500.
/// With no latest id set, `Latest` answers HTTP 503.
#[derive(Default)]
pub(crate) struct StubFetcher {
    comics: Mutex<HashMap<u64, RawComic>>,
    latest: Mutex<Option<u64>>,
    failing: Mutex<HashSet<u64>>,
    calls: Mutex<Vec<ComicRef>>,
}

impl StubFetcher {
    /// Issues `1..=max_id` with title "Comic <id>", latest set to `max_id`.
    pub(crate) fn with_range(max_id: u64) -> Self {
        let stub = Self::default();
        for id in 1..=max_id {
            stub.insert(raw(id, &format!("Comic {id}"), None));
        }
        stub.set_latest(Some(max_id));
        stub
    }

    pub(crate) fn insert(&self, comic: RawComic) {
        self.comics.lock().unwrap().insert(comic.num, comic);
    }

    pub(crate) fn remove(&self, id: u64) {
        self.comics.lock().unwrap().remove(&id);
    }

    pub(crate) fn set_latest(&self, id: Option<u64>) {
        *self.latest.lock().unwrap() = id;
    }

    pub(crate) fn fail(&self, id: u64) {
        self.failing.lock().unwrap().insert(id);
    }

    pub(crate) fn recover(&self, id: u64) {
        self.failing.lock().unwrap().remove(&id);
    }

    pub(crate) fn calls(&self) -> Vec<ComicRef> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self, target: ComicRef) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == target).count()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, target: ComicRef) -> Result<RawComic, UpstreamError> {
        self.calls.lock().unwrap().push(target);

        let id = match target {
            ComicRef::Latest => self.latest.lock().unwrap().ok_or(UpstreamError::HttpError { status: 503 })?,
            ComicRef::Issue(id) => id,
        };

        if self.failing.lock().unwrap().contains(&id) {
            return Err(UpstreamError::HttpError { status: 500 });
        }

        self.comics.lock().unwrap().get(&id).cloned().ok_or(UpstreamError::NotFound(id))
    }
}
